//! DTOs for the CI log analysis endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{CiProvider, FailureClassification, TriageReport, TriageRequest};

/// A pasted CI log with optional context.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub log_content: String,
    pub ci_provider: Option<CiProvider>,
    pub step_name: Option<String>,
    pub exit_code: Option<i64>,
}

impl From<AnalyzeRequest> for TriageRequest {
    fn from(req: AnalyzeRequest) -> Self {
        TriageRequest {
            log_content: req.log_content,
            ci_provider: req.ci_provider,
            step_name: req.step_name,
            exit_code: req.exit_code,
        }
    }
}

/// Structured analysis result.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub classification: FailureClassification,
    pub failing_step: String,
    pub key_error_line: String,
    pub explanation: String,
    pub suggested_action: String,
}

impl From<TriageReport> for AnalyzeResponse {
    fn from(report: TriageReport) -> Self {
        AnalyzeResponse {
            classification: report.classification,
            failing_step: report.failing_step,
            key_error_line: report.key_error_line,
            explanation: report.explanation,
            suggested_action: report.suggested_action,
        }
    }
}
