//! Handler for the UI entry point.

use axum::{
    Json,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

const INDEX_PATH: &str = "static/index.html";

/// Serves the bundled UI, or a JSON hint when no UI is deployed.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> Response {
    match tokio::fs::read_to_string(INDEX_PATH).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => Json(json!({
            "message": "URL shortener API. Open /static/index.html for the UI.",
            "endpoints": ["POST /shorten", "GET /{code}", "GET /health", "POST /api/analyze"]
        }))
        .into_response(),
    }
}
