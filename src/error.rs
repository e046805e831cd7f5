//! HTTP error type and mapping from service errors.
//!
//! Every failing request is answered with the same JSON envelope:
//!
//! ```json
//! { "error": { "code": "validation_error", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::domain::errors::{RepositoryError, ShortenError, TriageError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Unavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Unavailable { message, details } => ("unavailable", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::bad_request("Invalid request", Value::Object(fields))
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        tracing::error!(error = %e, "Storage failure");
        AppError::internal("Database error", json!({}))
    }
}

impl From<ShortenError> for AppError {
    fn from(e: ShortenError) -> Self {
        match e {
            ShortenError::InvalidCustomCode { code, reason } => {
                AppError::bad_request(reason, json!({ "custom_code": code }))
            }
            ShortenError::CodeInUse(code) => AppError::bad_request(
                "Custom code already in use",
                json!({ "custom_code": code }),
            ),
            ShortenError::AllocationExhausted { attempts } => {
                tracing::error!(attempts, "Code allocation exhausted");
                AppError::unavailable(
                    "Could not allocate a short code, try again later",
                    json!({ "attempts": attempts }),
                )
            }
            ShortenError::NotFound(code) => {
                AppError::not_found("Short URL not found", json!({ "code": code }))
            }
            ShortenError::Repository(e) => e.into(),
        }
    }
}

impl From<TriageError> for AppError {
    fn from(e: TriageError) -> Self {
        match e {
            TriageError::EmptyLog => AppError::bad_request(e.to_string(), json!({})),
            TriageError::NotConfigured => {
                tracing::error!("Triage requested without a configured provider");
                AppError::internal(e.to_string(), json!({}))
            }
            TriageError::Completion(ref inner) => {
                tracing::error!(error = %inner, "Triage completion failed");
                AppError::internal(e.to_string(), json!({}))
            }
        }
    }
}
