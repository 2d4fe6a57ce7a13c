//! # labgrade
//!
//! The grading core behind an academic lab portal: a keyword-matching mock
//! evaluator for lab and contest submissions, hint generation for failed
//! cases, per-question submission drafts, and a small key-value notes store.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Environment-driven configuration shared across the crate.
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// For all things related to grading submissions
pub mod grade;
/// Notes persistence behind an injected key-value store
pub mod notes;
/// Class/subject selection passed to views
pub mod scope;
/// Per-question drafts, runs and final submission
pub mod submission;
/// Shared data types
pub mod types;

pub use grade::{Evaluator, EvaluatorConfig, RunSummary, evaluate, hint_for};
pub use scope::ScopeContext;
pub use submission::{SubmissionBook, SubmissionDraft, SubmissionSnapshot, SubmissionStatus};
pub use types::{Language, TestCase, TestResult};
