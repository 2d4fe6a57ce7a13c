#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Line diffs of expected vs. actual output.
pub mod diff;
/// The keyword-matching mock evaluator.
pub mod evaluator;
/// Hints for failed test cases.
pub mod hint;
/// Canned programs run over test inputs.
pub mod programs;
/// Run tallies, grades and report rendering.
pub mod results;

pub use diff::format_diff;
pub use evaluator::{Evaluator, EvaluatorConfig, evaluate};
pub use hint::{hint_for, hint_text};
pub use programs::{ProgramError, eval_postfix, is_balanced};
pub use results::{Grade, RunSummary, render_report, results_table};
