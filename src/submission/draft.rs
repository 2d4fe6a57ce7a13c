#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    grade::RunSummary,
    types::{Language, TestResult},
};

/// Where a question's draft is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Opened but never edited.
    #[default]
    Untouched,
    /// Edited since the last run, or never run.
    Drafted,
    /// Run at least once and the last run had failures.
    Run,
    /// The last run passed every case.
    Completed,
}

impl Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SubmissionStatus::Untouched => "untouched",
            SubmissionStatus::Drafted => "drafted",
            SubmissionStatus::Run => "run",
            SubmissionStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// A student's in-progress answer for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    /// Theory answer text.
    answer:   String,
    /// Source code.
    code:     String,
    /// Language the code is written in.
    language: Language,
    /// Results of the most recent run.
    last_run: Option<Vec<TestResult>>,
    /// Lifecycle marker.
    status:   SubmissionStatus,
}

impl SubmissionDraft {
    /// Creates an untouched draft in the given language.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Returns the theory answer.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns the source code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the chosen language.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Returns the results of the last run, if any.
    pub fn last_run(&self) -> Option<&[TestResult]> {
        self.last_run.as_deref()
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Tallies of the last run, if any.
    pub fn summary(&self) -> Option<RunSummary> {
        self.last_run().map(RunSummary::from_results)
    }

    /// Replaces the theory answer.
    pub fn set_answer(&mut self, answer: impl Into<String>) {
        let answer = answer.into();
        if answer != self.answer {
            self.answer = answer;
            self.touch();
        }
    }

    /// Replaces the source code.
    pub fn set_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        if code != self.code {
            self.code = code;
            self.touch();
        }
    }

    /// Switches the language.
    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            self.language = language;
            self.touch();
        }
    }

    /// Stores a run. The draft is completed when the run is non-empty and
    /// every case passed.
    pub fn record_run(&mut self, results: Vec<TestResult>) {
        self.status = if RunSummary::from_results(&results).all_passed() {
            SubmissionStatus::Completed
        } else {
            SubmissionStatus::Run
        };
        self.last_run = Some(results);
    }

    /// Any edit returns the draft to `Drafted`; the last run stays until the
    /// next one replaces it.
    fn touch(&mut self) {
        self.status = SubmissionStatus::Drafted;
    }
}
