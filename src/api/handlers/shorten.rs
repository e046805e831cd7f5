//! Handler for the shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short link for a URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a", "custom_code": "mylink" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "code": "mylink",
///   "short_url": "http://localhost:8000/mylink",
///   "created_at": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// A URL that was shortened before returns its existing record, and any
/// `custom_code` in the request is ignored in that case.
///
/// # Errors
///
/// - 400 if the URL or custom code is invalid, or the custom code is taken
/// - 503 if no free code was found within the attempt budget
/// - 500 on storage failures
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let record = state
        .shortener
        .allocate(&payload.url, payload.custom_code())
        .await?;

    let short_url = state.shortener.short_url(&record.code);

    Ok(Json(ShortenResponse {
        code: record.code,
        short_url,
        created_at: record.created_at,
    }))
}
