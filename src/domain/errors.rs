//! Error kinds produced by the domain and application layers.
//!
//! These carry no HTTP semantics; [`crate::error::AppError`] maps them onto
//! status codes at the boundary.

use std::fmt;
use thiserror::Error;

/// Unique column hit by a conflicting insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Code,
    TargetUrl,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code => f.write_str("code"),
            Self::TargetUrl => f.write_str("target_url"),
        }
    }
}

/// Errors returned by [`crate::domain::repositories::ShortUrlRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The insert lost against an existing row with the same unique value.
    #[error("unique constraint violated on {0}")]
    UniquenessConflict(UniqueField),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors surfaced by the allocation engine and redirection lookup.
///
/// `UniquenessConflict` never appears here: the engine retries it.
#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("invalid custom code: {reason}")]
    InvalidCustomCode { code: String, reason: String },

    #[error("custom code already in use: {0}")]
    CodeInUse(String),

    #[error("no available code found after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    #[error("short code not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from the external text-completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request to completion service failed: {0}")]
    Transport(String),

    #[error("completion service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion reply was not a JSON object: {0}")]
    MalformedReply(String),
}

/// Errors surfaced by the triage service.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Log content is required")]
    EmptyLog,

    #[error("OPENROUTER_API_KEY environment variable is not set")]
    NotConfigured,

    #[error("Analysis failed: {0}")]
    Completion(#[from] CompletionError),
}
