//! Handler for CI log analysis.

use axum::{Json, extract::State};

use crate::api::dto::analyze::{AnalyzeRequest, AnalyzeResponse};
use crate::domain::entities::TriageRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Classifies a pasted CI log and suggests a next step.
///
/// # Endpoint
///
/// `POST /api/analyze`
///
/// # Request Body
///
/// ```json
/// {
///   "log_content": "...",
///   "ci_provider": "github_actions",
///   "step_name": "cargo test",
///   "exit_code": 101
/// }
/// ```
///
/// # Errors
///
/// - 400 if `log_content` is blank
/// - 500 if no completion provider is configured or the provider call fails
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request = TriageRequest::from(payload);
    let report = state.triage.analyze(&request).await?;

    Ok(Json(report.into()))
}
