//! DTOs for health check endpoint.

use serde::{Deserialize, Serialize};

/// Liveness response. Always `{"status": "ok"}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
