//! CI failure triage request and report types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CI system the log was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CiProvider {
    GithubActions,
    Jenkins,
}

impl CiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GithubActions => "github_actions",
            Self::Jenkins => "jenkins",
        }
    }
}

impl fmt::Display for CiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure category reported for an analyzed log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClassification {
    TestFailure,
    LintFailure,
    InfraFailure,
    ConfigFailure,
    Unknown,
}

impl FailureClassification {
    /// Maps a free-form label returned by the model onto a known category.
    ///
    /// Matching is case-insensitive and accepts both the snake_case form and
    /// the spelled-out variants (`"test failure"`, `"infrastructure failure"`).
    /// Anything else is [`FailureClassification::Unknown`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "test_failure" | "test failure" => Self::TestFailure,
            "lint_failure" | "lint failure" => Self::LintFailure,
            "infra_failure" | "infra failure" | "infrastructure failure" => Self::InfraFailure,
            "config_failure" | "config failure" | "configuration failure" => Self::ConfigFailure,
            _ => Self::Unknown,
        }
    }
}

/// A pasted CI log plus optional context about where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageRequest {
    pub log_content: String,
    pub ci_provider: Option<CiProvider>,
    pub step_name: Option<String>,
    pub exit_code: Option<i64>,
}

/// Structured triage result with every field populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageReport {
    pub classification: FailureClassification,
    pub failing_step: String,
    pub key_error_line: String,
    pub explanation: String,
    pub suggested_action: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_from_snake_case() {
        assert_eq!(
            FailureClassification::from_label("test_failure"),
            FailureClassification::TestFailure
        );
        assert_eq!(
            FailureClassification::from_label("lint_failure"),
            FailureClassification::LintFailure
        );
        assert_eq!(
            FailureClassification::from_label("infra_failure"),
            FailureClassification::InfraFailure
        );
        assert_eq!(
            FailureClassification::from_label("config_failure"),
            FailureClassification::ConfigFailure
        );
    }

    #[test]
    fn test_classification_from_spelled_out_labels() {
        assert_eq!(
            FailureClassification::from_label("  Test Failure "),
            FailureClassification::TestFailure
        );
        assert_eq!(
            FailureClassification::from_label("Infrastructure failure"),
            FailureClassification::InfraFailure
        );
        assert_eq!(
            FailureClassification::from_label("CONFIGURATION FAILURE"),
            FailureClassification::ConfigFailure
        );
    }

    #[test]
    fn test_classification_unknown_label() {
        assert_eq!(
            FailureClassification::from_label("flaky"),
            FailureClassification::Unknown
        );
        assert_eq!(
            FailureClassification::from_label(""),
            FailureClassification::Unknown
        );
    }

    #[test]
    fn test_ci_provider_serde() {
        let provider: CiProvider = serde_json::from_str("\"github_actions\"").unwrap();
        assert_eq!(provider, CiProvider::GithubActions);
        assert_eq!(provider.to_string(), "github_actions");

        let json = serde_json::to_string(&CiProvider::Jenkins).unwrap();
        assert_eq!(json, "\"jenkins\"");
    }

    #[test]
    fn test_classification_serializes_snake_case() {
        let json = serde_json::to_string(&FailureClassification::InfraFailure).unwrap();
        assert_eq!(json, "\"infra_failure\"");
    }
}
