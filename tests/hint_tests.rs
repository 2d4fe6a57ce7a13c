use labgrade::{
    TestResult,
    grade::hint::{
        CASE_HINT, ELEMENT_COUNT_HINT, GENERIC_HINT, LONGER_HINT, NO_OUTPUT_HINT, SHORTER_HINT,
        WHITESPACE_HINT, hint_for, hint_text,
    },
};

fn failed(actual: &str, expected: &str) -> TestResult {
    TestResult {
        test_case_id:    1,
        passed:          false,
        input:           String::new(),
        expected_output: expected.to_string(),
        actual_output:   actual.to_string(),
        execution_time:  100,
        error:           None,
        is_hidden:       false,
    }
}

#[test]
fn empty_output_wins_over_everything() {
    assert_eq!(hint_text("", "5"), NO_OUTPUT_HINT);
    assert_eq!(hint_text("   ", ""), NO_OUTPUT_HINT);
}

#[test]
fn length_checks_come_before_content_checks() {
    assert_eq!(hint_text("Alice", "Alice,Bob"), SHORTER_HINT);
    assert_eq!(hint_text("ALICE,BOB", "alice"), LONGER_HINT);
}

#[test]
fn same_length_with_different_element_count() {
    assert_eq!(hint_text("a,bc", "ab,c"), GENERIC_HINT);
    assert_eq!(hint_text("a,b,c", "ab;cd"), ELEMENT_COUNT_HINT);
}

#[test]
fn case_then_whitespace_then_fallback() {
    assert_eq!(hint_text("ALICE", "alice"), CASE_HINT);
    assert_eq!(hint_text("a b,c", "ab ,c"), WHITESPACE_HINT);
    assert_eq!(hint_text("7", "8"), GENERIC_HINT);
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(hint_text("  7  ", "8\n"), GENERIC_HINT);
}

#[test]
fn only_failed_results_without_error_get_hints() {
    let mut passed = failed("5", "5");
    passed.passed = true;
    assert_eq!(hint_for(&passed), None);

    let mut errored = failed("", "5");
    errored.error = Some("Invalid postfix expression".into());
    assert_eq!(hint_for(&errored), None);

    assert_eq!(hint_for(&failed("", "5")), Some(NO_OUTPUT_HINT));
}
