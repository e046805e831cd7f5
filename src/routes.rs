//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - UI entry point
//! - `GET  /{code}`      - Short link redirect
//! - `GET  /health`      - Liveness probe
//! - `POST /shorten`     - Create a short link (rate limited)
//! - `POST /api/analyze` - CI log triage (rate limited)
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the POST endpoints
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, index_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// Static routes take precedence over `/{code}`, so `GET /health` never
/// reaches the redirect handler. The rate limiters key on the peer address;
/// serve the result with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::shorten_routes())
        .nest("/api", api::routes::api_routes())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
