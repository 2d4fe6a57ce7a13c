#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The question book, snapshots and submit handoff.
pub mod book;
/// Per-question drafts and their status.
pub mod draft;

pub use book::{
    QuestionSnapshot, SubmissionBook, SubmissionError, SubmissionSnapshot, SubmitHandler,
};
pub use draft::{SubmissionDraft, SubmissionStatus};
