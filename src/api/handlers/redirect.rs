//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Lookup is exact and case-sensitive. Responds with `307 Temporary Redirect`
/// so clients re-resolve the code on every visit.
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target_url = state.shortener.resolve(&code).await?;
    debug!(code = %code, "Redirecting");

    Ok(Redirect::temporary(&target_url))
}
