use std::{convert::Infallible, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Language tag a submission is written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    /// Python
    #[default]
    Python,
    /// Java
    Java,
    /// C++
    Cpp,
    /// JavaScript
    JavaScript,
    /// SQL queries
    Sql,
    /// Any tag the evaluator has no rules for.
    Other(String),
}

impl Language {
    /// Returns the lowercase tag for this language.
    pub fn as_str(&self) -> &str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::JavaScript => "javascript",
            Language::Sql => "sql",
            Language::Other(tag) => tag,
        }
    }
}

impl FromStr for Language {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Ok(match tag.as_str() {
            "python" | "py" => Language::Python,
            "java" => Language::Java,
            "cpp" | "c++" => Language::Cpp,
            "javascript" | "js" => Language::JavaScript,
            "sql" => Language::Sql,
            _ => Language::Other(tag),
        })
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(lang) => lang,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        Language::from(value.to_string())
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.as_str().to_string()
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input/expected-output pair authored for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Input handed to the submission.
    pub input:     String,
    /// Expected output.
    pub output:    String,
    /// Hidden cases are graded but never shown to the student.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_hidden: bool,
}

impl TestCase {
    /// Creates a visible test case.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input:     input.into(),
            output:    output.into(),
            is_hidden: false,
        }
    }

    /// Creates a hidden test case.
    pub fn hidden(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            is_hidden: true,
            ..Self::new(input, output)
        }
    }
}

/// Outcome of running one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// 1-based position of the case in its batch.
    pub test_case_id:    usize,
    /// Whether the trimmed actual output equals the trimmed expected output.
    pub passed:          bool,
    /// Input of the case, echoed unchanged.
    pub input:           String,
    /// Expected output of the case, echoed unchanged.
    pub expected_output: String,
    /// Output produced by the mock evaluator.
    pub actual_output:   String,
    /// Simulated execution time in milliseconds.
    pub execution_time:  u64,
    /// Set when the mock program failed on this case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:           Option<String>,
    /// Copied from the case.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_hidden:       bool,
}
