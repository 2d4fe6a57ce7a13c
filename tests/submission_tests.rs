use std::time::Duration;

use labgrade::{
    Language, ScopeContext, SubmissionBook, SubmissionSnapshot, SubmissionStatus, TestCase,
    submission::SubmissionError,
};

fn book() -> SubmissionBook {
    SubmissionBook::builder()
        .latency(Duration::ZERO)
        .scope(ScopeContext::all().with_class("CS-A").with_subject("DS"))
        .build()
}

fn postfix_cases() -> Vec<TestCase> {
    vec![TestCase::new("3 4 +", "7"), TestCase::new("5 1 2 + 4 * + 3 -", "14")]
}

#[test]
fn opening_creates_untouched_draft() {
    let mut book = book();
    let draft = book.open("q1");
    assert_eq!(draft.status(), SubmissionStatus::Untouched);
    assert!(draft.last_run().is_none());
    assert_eq!(draft.language(), &Language::Python);
}

#[test]
fn edits_move_draft_to_drafted() {
    let mut book = book();
    book.open("q1").set_answer("A stack is LIFO.");
    book.open("q2").set_code("print(1)");
    book.open("q3").set_language(Language::Sql);

    for q in ["q1", "q2", "q3"] {
        assert_eq!(book.draft(q).map(|d| d.status()), Some(SubmissionStatus::Drafted));
    }
}

#[test]
fn setting_the_same_value_is_not_an_edit() {
    let mut book = book();
    book.open("q1").set_code("");
    assert_eq!(book.draft("q1").map(|d| d.status()), Some(SubmissionStatus::Untouched));
}

#[tokio::test]
async fn passing_run_completes_the_draft() {
    let mut book = book();
    book.open("q1").set_code("def postfix(expr): ...");

    let results = book.run("q1", &postfix_cases()).await.expect("run");
    assert_eq!(results.len(), 2);

    let draft = book.draft("q1").expect("draft");
    assert_eq!(draft.status(), SubmissionStatus::Completed);
    assert_eq!(draft.summary().map(|s| s.passed), Some(2));
    assert_eq!(book.progress(), (1, 1));
}

#[tokio::test]
async fn failing_run_marks_run_and_edit_returns_to_drafted() {
    let mut book = book();
    book.open("q1").set_code("print('hi')");
    book.run("q1", &postfix_cases()).await.expect("run");
    assert_eq!(book.draft("q1").map(|d| d.status()), Some(SubmissionStatus::Run));

    book.open("q1").set_code("def postfix(e): ...");
    let draft = book.draft("q1").expect("draft");
    assert_eq!(draft.status(), SubmissionStatus::Drafted);
    assert!(draft.last_run().is_some());

    book.run("q1", &postfix_cases()).await.expect("rerun");
    assert_eq!(book.draft("q1").map(|d| d.status()), Some(SubmissionStatus::Completed));
}

#[tokio::test]
async fn empty_run_does_not_complete() {
    let mut book = book();
    book.open("q1").set_code("postfix");
    book.run("q1", &[]).await.expect("run");
    assert_eq!(book.draft("q1").map(|d| d.status()), Some(SubmissionStatus::Run));
}

#[tokio::test]
async fn running_without_code_is_rejected() {
    let mut book = book();
    book.open("q1").set_answer("theory only");
    book.open("q1").set_code("   \n");

    let err = book.run("q1", &postfix_cases()).await.unwrap_err();
    assert!(matches!(err, SubmissionError::EmptyCode(ref q) if q == "q1"));
    assert!(book.draft("q1").and_then(|d| d.last_run()).is_none());

    let err = book.run("missing", &postfix_cases()).await.unwrap_err();
    assert!(matches!(err, SubmissionError::UnknownQuestion(_)));
}

#[tokio::test]
async fn submit_hands_off_a_snapshot_of_every_draft() {
    let mut book = book();
    book.open("q2").set_answer("Queues are FIFO.");
    book.open("q1").set_code("bool balanced(string s)");
    book.open("q1").set_language(Language::Cpp);
    book.run("q1", &[TestCase::new("(a(b)c)", "true")])
        .await
        .expect("run");

    let mut received: Vec<SubmissionSnapshot> = Vec::new();
    let mut handler = |snapshot: SubmissionSnapshot| -> anyhow::Result<()> {
        received.push(snapshot);
        Ok(())
    };
    let id = book.submit(&mut handler).await.expect("submit");

    assert_eq!(received.len(), 1);
    let snapshot = &received[0];
    assert_eq!(snapshot.id, id);
    assert_eq!(snapshot.scope.class.as_deref(), Some("CS-A"));
    assert_eq!(
        snapshot
            .entries
            .iter()
            .map(|e| e.question_id.as_str())
            .collect::<Vec<_>>(),
        vec!["q1", "q2"]
    );
    assert_eq!(snapshot.entries[0].language, Language::Cpp);
    assert_eq!(snapshot.entries[0].status, SubmissionStatus::Completed);
    assert_eq!(snapshot.entries[1].answer, "Queues are FIFO.");
    assert!(snapshot.entries[1].last_run.is_none());
}

#[tokio::test]
async fn submit_requires_an_opened_question() {
    let book = book();
    let mut handler = |_: SubmissionSnapshot| -> anyhow::Result<()> { Ok(()) };
    let err = book.submit(&mut handler).await.unwrap_err();
    assert!(matches!(err, SubmissionError::NothingToSubmit));
}

#[tokio::test]
async fn handler_failure_surfaces_as_error() {
    let mut book = book();
    book.open("q1").set_answer("x");
    let mut handler = |_: SubmissionSnapshot| -> anyhow::Result<()> {
        anyhow::bail!("grading service offline")
    };
    let err = book.submit(&mut handler).await.unwrap_err();
    assert!(err.to_string().contains("grading service offline"));
}

#[test]
fn snapshot_serializes_with_camel_case_keys() {
    let mut book = book();
    book.open("q1").set_code("SELECT 1");
    let json = serde_json::to_value(book.snapshot()).expect("serialize");
    assert!(json.get("submittedAt").is_some());
    assert_eq!(json["entries"][0]["questionId"], "q1");
    assert_eq!(json["entries"][0]["status"], "drafted");
    assert_eq!(json["scope"]["subject"], "DS");
}
