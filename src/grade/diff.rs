#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use similar::{ChangeTag, TextDiff};

/// Formats a line diff between expected and actual output.
///
/// Lines are prefixed with `-` when only expected, `+` when only actual.
pub fn format_diff(expected: &str, actual: &str) -> String {
    let expected = ensure_trailing_newline(expected.trim());
    let actual = ensure_trailing_newline(actual.trim());
    let diff = TextDiff::from_lines(&expected, &actual);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let prefix = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        output.push_str(&format!("{} {}", prefix, change));
    }

    output
}

/// Appends a newline so the last line diffs like the others.
fn ensure_trailing_newline(s: &str) -> String {
    format!("{s}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_changed_lines() {
        let out = format_diff("7", "8");
        assert_eq!(out, "- 7\n+ 8\n");
    }

    #[test]
    fn equal_lines_are_context() {
        let out = format_diff("a\nb", "a\nc\n");
        assert_eq!(out, "  a\n- b\n+ c\n");
    }
}
