#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::types::TestResult;

/// Hint for a run that printed nothing.
pub const NO_OUTPUT_HINT: &str =
    "Your code produced no output. Make sure you print or return the result.";
/// Hint for output that is too short.
pub const SHORTER_HINT: &str =
    "Your output is shorter than expected. Check whether some elements are missing.";
/// Hint for output that is too long.
pub const LONGER_HINT: &str =
    "Your output is longer than expected. Check for extra elements or characters.";
/// Hint for a differing number of comma separated elements.
pub const ELEMENT_COUNT_HINT: &str =
    "The number of elements in your output does not match the expected count.";
/// Hint for output that differs only in letter case.
pub const CASE_HINT: &str = "Check letter casing. Your output differs only in upper/lower case.";
/// Hint for output that differs only in whitespace.
pub const WHITESPACE_HINT: &str = "Check spacing. Your output differs only in whitespace.";
/// Fallback hint.
pub const GENERIC_HINT: &str =
    "Your output does not match the expected result. Review your logic and try again.";

/// Returns a hint for a failed result that carries no error.
///
/// Passed results and results with an error get `None`.
pub fn hint_for(result: &TestResult) -> Option<&'static str> {
    if result.passed || result.error.is_some() {
        return None;
    }
    Some(hint_text(&result.actual_output, &result.expected_output))
}

/// Picks a hint by comparing `actual` with `expected`. The first check that
/// applies wins, in this order: empty output, shorter, longer, element count,
/// casing, whitespace.
pub fn hint_text(actual: &str, expected: &str) -> &'static str {
    let actual = actual.trim();
    let expected = expected.trim();
    let actual_len = actual.chars().count();
    let expected_len = expected.chars().count();

    if actual.is_empty() {
        NO_OUTPUT_HINT
    } else if actual_len < expected_len {
        SHORTER_HINT
    } else if actual_len > expected_len {
        LONGER_HINT
    } else if actual.split(',').count() != expected.split(',').count() {
        ELEMENT_COUNT_HINT
    } else if actual.to_lowercase() == expected.to_lowercase() {
        CASE_HINT
    } else if strip_whitespace(actual) == strip_whitespace(expected) {
        WHITESPACE_HINT
    } else {
        GENERIC_HINT
    }
}

/// Removes every whitespace character.
fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
