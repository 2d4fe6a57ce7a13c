#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use bon::Builder;
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};

use super::{diff::format_diff, hint::hint_for};
use crate::{constants::HIDDEN_MASK, types::TestResult};

#[derive(Debug, Clone, Copy, PartialEq, Default, Builder, Serialize, Deserialize)]
/// A struct representing a grade
pub struct Grade {
    /// The actual grade received
    pub grade:  f64,
    /// The maximum grade possible
    pub out_of: f64,
}

impl Grade {
    /// Creates a new grade -
    /// * `grade` - The actual grade received
    /// * `out_of` - The maximum grade possible
    pub fn new(grade: f64, out_of: f64) -> Self {
        Self { grade, out_of }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}/{:.2}", self.grade, self.out_of)
    }
}

/// Pass/fail tallies for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of cases in the run.
    pub total:   usize,
    /// Cases whose output matched.
    pub passed:  usize,
    /// Cases that did not pass, errors included.
    pub failed:  usize,
    /// Cases that failed with an error.
    pub errored: usize,
    /// Hidden cases in the run.
    pub hidden:  usize,
}

impl RunSummary {
    /// Tallies a slice of results.
    pub fn from_results(results: &[TestResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            if r.passed {
                acc.passed += 1;
            } else {
                acc.failed += 1;
            }
            if r.error.is_some() {
                acc.errored += 1;
            }
            if r.is_hidden {
                acc.hidden += 1;
            }
            acc
        })
    }

    /// True when there was at least one case and every case passed.
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }

    /// Share of `out_of` proportional to the passed cases.
    pub fn score(&self, out_of: f64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            out_of * self.passed as f64 / self.total as f64
        }
    }

    /// The score wrapped as a [`Grade`].
    pub fn grade(&self, out_of: f64) -> Grade {
        Grade::new(self.score(out_of), out_of)
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} test cases passed", self.passed, self.total)?;
        if self.errored > 0 {
            write!(f, " ({} errored)", self.errored)?;
        }
        Ok(())
    }
}

#[derive(Tabled)]
/// One table row per test result
struct ResultRow {
    #[tabled(rename = "#")]
    /// * `id`: test case number
    id:       usize,
    #[tabled(rename = "Verdict")]
    /// * `verdict`: PASS, FAIL or ERROR
    verdict:  &'static str,
    #[tabled(rename = "Input")]
    /// * `input`: case input, masked when hidden
    input:    String,
    #[tabled(rename = "Expected")]
    /// * `expected`: expected output, masked when hidden
    expected: String,
    #[tabled(rename = "Actual")]
    /// * `actual`: produced output, masked when hidden
    actual:   String,
    #[tabled(rename = "Time (ms)")]
    /// * `time`: simulated execution time
    time:     u64,
    #[tabled(rename = "Note")]
    /// * `note`: error message or hint
    note:     String,
}

impl From<&TestResult> for ResultRow {
    fn from(r: &TestResult) -> Self {
        let verdict = match (r.passed, r.error.is_some()) {
            (true, _) => "PASS",
            (false, true) => "ERROR",
            (false, false) => "FAIL",
        };
        let mask = |s: &str| {
            if r.is_hidden {
                HIDDEN_MASK.to_string()
            } else {
                s.to_string()
            }
        };
        let note = r
            .error
            .clone()
            .or_else(|| hint_for(r).map(str::to_string))
            .unwrap_or_default();

        Self {
            id: r.test_case_id,
            verdict,
            input: mask(&r.input),
            expected: mask(&r.expected_output),
            actual: mask(&r.actual_output),
            time: r.execution_time,
            note,
        }
    }
}

/// Renders results as a table, hidden cases masked.
pub fn results_table(results: &[TestResult]) -> String {
    let rows: Vec<ResultRow> = results.iter().map(ResultRow::from).collect();
    let summary = RunSummary::from_results(results);

    Table::new(rows)
        .with(Panel::header("Test Results"))
        .with(Panel::footer(summary.to_string()))
        .with(Modify::new(Rows::new(1..)).with(Width::wrap(24).keep_words(true)))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(
            Modify::new(Rows::last())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern())
        .to_string()
}

/// Renders the table followed by an expected/actual diff for every visible
/// failed case without an error.
pub fn render_report(results: &[TestResult]) -> String {
    let mut report = results_table(results);

    for r in results
        .iter()
        .filter(|r| !r.passed && !r.is_hidden && r.error.is_none())
    {
        report.push_str(&format!(
            "\n\nCase {} diff (- expected, + actual):\n{}",
            r.test_case_id,
            format_diff(&r.expected_output, &r.actual_output)
        ));
    }

    report
}
