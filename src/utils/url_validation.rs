//! Target URL validation.
//!
//! Target URLs are stored exactly as submitted; this module only decides
//! whether a string is acceptable as a redirect target.

use std::borrow::Cow;
use url::Url;
use validator::ValidationError;

/// Errors that can occur while validating a target URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// # Security
///
/// Rejects schemes like `javascript:`, `data:` and `file:` so a short link
/// can never redirect into script or local content.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes and
/// [`UrlValidationError::MissingHost`] when no host is present.
pub fn check_target_url(input: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// `validator` adapter for [`check_target_url`].
pub fn validate_target_url(input: &str) -> Result<(), ValidationError> {
    check_target_url(input).map_err(|e| {
        ValidationError::new("target_url").with_message(Cow::Owned(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(check_target_url("https://example.com/a").is_ok());
        assert!(check_target_url("http://example.com:8080/path?q=1#frag").is_ok());
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(matches!(
            check_target_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            check_target_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        assert_eq!(
            check_target_url("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            check_target_url("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            check_target_url("ftp://example.com"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_validator_adapter_carries_message() {
        let err = validate_target_url("mailto:someone@example.com").unwrap_err();
        assert_eq!(err.code, "target_url");
        assert!(err.message.unwrap().contains("HTTP and HTTPS"));
    }
}
