#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::BTreeMap, time::Duration};

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::draft::{SubmissionDraft, SubmissionStatus};
use crate::{
    constants::SIMULATED_LATENCY,
    grade::Evaluator,
    scope::ScopeContext,
    types::{Language, TestCase, TestResult},
};

/// Validation failures surfaced to the student.
#[derive(thiserror::Error, Debug)]
pub enum SubmissionError {
    /// Run requested with no code.
    #[error("Please write some code for `{0}` before running it.")]
    EmptyCode(String),
    /// The question was never opened.
    #[error("No draft exists for question `{0}`.")]
    UnknownQuestion(String),
    /// Submit requested before any question was opened.
    #[error("There is nothing to submit yet.")]
    NothingToSubmit,
    /// The submit handler refused the snapshot.
    #[error("Submission could not be handed off: {0}")]
    Handler(#[from] anyhow::Error),
}

/// Receives the final snapshot when the student submits.
pub trait SubmitHandler {
    /// Takes ownership of the snapshot.
    fn on_submit(&mut self, snapshot: SubmissionSnapshot) -> anyhow::Result<()>;
}

impl<F> SubmitHandler for F
where
    F: FnMut(SubmissionSnapshot) -> anyhow::Result<()>,
{
    fn on_submit(&mut self, snapshot: SubmissionSnapshot) -> anyhow::Result<()> {
        self(snapshot)
    }
}

/// Frozen copy of one question's draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSnapshot {
    /// Question the draft belongs to.
    pub question_id: String,
    /// Theory answer.
    pub answer:      String,
    /// Source code.
    pub code:        String,
    /// Language of the code.
    pub language:    Language,
    /// Results of the last run, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run:    Option<Vec<TestResult>>,
    /// Status at submit time.
    pub status:      SubmissionStatus,
}

/// Everything the student hands in at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSnapshot {
    /// Identifier of this hand-in.
    pub id:           Uuid,
    /// Class/subject the work was done under.
    pub scope:        ScopeContext,
    /// When the snapshot was taken.
    pub submitted_at: DateTime<Utc>,
    /// One entry per opened question, ordered by question id.
    pub entries:      Vec<QuestionSnapshot>,
}

/// In-memory drafts for every question of a lab or contest.
#[derive(Debug, Clone, Builder)]
pub struct SubmissionBook {
    /// Class/subject selection the book was opened under.
    #[builder(default)]
    scope:     ScopeContext,
    /// Grades runs.
    #[builder(default)]
    evaluator: Evaluator,
    /// Pause before runs and submits.
    #[builder(default = SIMULATED_LATENCY)]
    latency:   Duration,
    /// Language new drafts start in.
    #[builder(default)]
    language:  Language,
    /// Drafts keyed by question id.
    #[builder(skip)]
    drafts:    BTreeMap<String, SubmissionDraft>,
}

impl Default for SubmissionBook {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SubmissionBook {
    /// Returns the scope the book was opened under.
    pub fn scope(&self) -> &ScopeContext {
        &self.scope
    }

    /// Opens a question, creating an untouched draft on first use.
    pub fn open(&mut self, question_id: impl Into<String>) -> &mut SubmissionDraft {
        let language = self.language.clone();
        self.drafts
            .entry(question_id.into())
            .or_insert_with(|| SubmissionDraft::new(language))
    }

    /// Returns the draft for a question, if opened.
    pub fn draft(&self, question_id: &str) -> Option<&SubmissionDraft> {
        self.drafts.get(question_id)
    }

    /// Iterates drafts ordered by question id.
    pub fn drafts(&self) -> impl Iterator<Item = (&str, &SubmissionDraft)> {
        self.drafts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `(completed, opened)` question counts for progress badges.
    pub fn progress(&self) -> (usize, usize) {
        let completed = self
            .drafts
            .values()
            .filter(|d| d.status() == SubmissionStatus::Completed)
            .count();
        (completed, self.drafts.len())
    }

    /// Evaluates the current code of a question and stores the results.
    pub async fn run(
        &mut self,
        question_id: &str,
        cases: &[TestCase],
    ) -> Result<&[TestResult], SubmissionError> {
        let draft = self
            .drafts
            .get(question_id)
            .ok_or_else(|| SubmissionError::UnknownQuestion(question_id.to_string()))?;
        if draft.code().trim().is_empty() {
            return Err(SubmissionError::EmptyCode(question_id.to_string()));
        }

        tokio::time::sleep(self.latency).await;

        let draft = self
            .drafts
            .get_mut(question_id)
            .ok_or_else(|| SubmissionError::UnknownQuestion(question_id.to_string()))?;
        let results = self
            .evaluator
            .evaluate(draft.code(), cases, draft.language());
        draft.record_run(results);

        if let Some(summary) = draft.summary() {
            tracing::info!(question = question_id, status = %draft.status(), "{summary}");
        }

        Ok(draft.last_run().unwrap_or_default())
    }

    /// Freezes every draft into a snapshot.
    pub fn snapshot(&self) -> SubmissionSnapshot {
        let entries = self
            .drafts
            .iter()
            .map(|(id, d)| QuestionSnapshot {
                question_id: id.clone(),
                answer:      d.answer().to_string(),
                code:        d.code().to_string(),
                language:    d.language().clone(),
                last_run:    d.last_run().map(<[TestResult]>::to_vec),
                status:      d.status(),
            })
            .collect();

        SubmissionSnapshot {
            id: Uuid::new_v4(),
            scope: self.scope.clone(),
            submitted_at: Utc::now(),
            entries,
        }
    }

    /// Hands a snapshot of every draft to `handler` and returns its id.
    pub async fn submit<H: SubmitHandler>(&self, handler: &mut H) -> Result<Uuid, SubmissionError> {
        if self.drafts.is_empty() {
            return Err(SubmissionError::NothingToSubmit);
        }

        tokio::time::sleep(self.latency).await;

        let snapshot = self.snapshot();
        let id = snapshot.id;
        let (completed, total) = self.progress();
        tracing::info!(%id, scope = %self.scope.label(), completed, total, "submitting");
        handler.on_submit(snapshot)?;
        Ok(id)
    }
}
