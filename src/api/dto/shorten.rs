//! DTOs for the shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::code_generator::normalize_custom_code;
use crate::utils::url_validation::validate_target_url;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The target URL (absolute HTTP/HTTPS). Stored exactly as submitted.
    #[validate(custom(function = "validate_target_url"))]
    pub url: String,

    /// Optional custom short code. Format rules are enforced by the
    /// allocation engine so the API and CLI report identical errors.
    #[serde(default)]
    pub custom_code: Option<String>,
}

impl ShortenRequest {
    /// Custom code with blank values treated as absent.
    pub fn custom_code(&self) -> Option<&str> {
        normalize_custom_code(self.custom_code.as_deref())
    }
}

/// A created (or deduplicated) short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}
