//! API route configuration.

use crate::api::handlers::{analyze_handler, shorten_handler};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Link creation, rate limited per client IP.
///
/// # Endpoints
///
/// - `POST /shorten` - Create (or return the existing) short link
pub fn shorten_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .layer(rate_limit::layer())
}

/// Routes nested under `/api`, with the stricter rate limit.
///
/// # Endpoints
///
/// - `POST /analyze` - Classify a CI failure log
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .layer(rate_limit::secure_layer())
}
