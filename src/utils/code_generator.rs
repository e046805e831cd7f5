//! Short code generation and validation utilities.
//!
//! Provides cryptographically secure random code generation and validation
//! for custom user-provided codes.

use crate::domain::errors::ShortenError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use std::sync::LazyLock;

/// Shortest code the service accepts or generates.
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest code the service accepts or generates.
pub const MAX_CODE_LENGTH: usize = 16;

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("code pattern is a valid regex"));

/// Codes that would be shadowed by fixed routes.
const RESERVED_CODES: &[&str] = &["health", "shorten", "static"];

/// Source of candidate short codes.
///
/// Candidates are not guaranteed to be unused; the allocation engine checks
/// availability and retries on collision.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a candidate code of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Generator drawing uniformly from `[A-Za-z0-9]`.
///
/// Backed by the thread-local `rand` generator, a CSPRNG seeded from the
/// operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}

/// Returns true if `code` is claimed by a fixed route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Returns true if `length` is a permitted code length.
pub fn is_valid_code_length(length: usize) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length)
}

/// Treats a blank or whitespace-only custom code as no custom code.
///
/// Non-blank input is returned untouched, so padded codes still fail
/// [`validate_custom_code`].
pub fn normalize_custom_code(code: Option<&str>) -> Option<&str> {
    code.filter(|code| !code.trim().is_empty())
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 4-16 characters
/// - Allowed characters: ASCII letters and digits (case-sensitive)
///
/// Reserved route names pass here; the availability check reports them taken.
///
/// # Errors
///
/// Returns [`ShortenError::InvalidCustomCode`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("Promo2025").is_ok());
/// assert!(validate_custom_code("abc").is_err());       // Too short
/// assert!(validate_custom_code("my-link").is_err());   // Hyphen
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), ShortenError> {
    let invalid = |reason: String| ShortenError::InvalidCustomCode {
        code: code.to_string(),
        reason,
    };

    let length = code.chars().count();
    if !is_valid_code_length(length) {
        return Err(invalid(format!(
            "Custom code must be {MIN_CODE_LENGTH}-{MAX_CODE_LENGTH} characters, got {length}"
        )));
    }

    if !CODE_PATTERN.is_match(code) {
        return Err(invalid(
            "Custom code can only contain letters and digits".to_string(),
        ));
    }

    Ok(())
}
