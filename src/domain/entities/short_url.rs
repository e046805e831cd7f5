//! Short URL entity representing a code → target mapping.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// Records are created once by the allocation engine and never updated or
/// deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(id: i64, code: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            target_url,
            created_at,
        }
    }
}

/// Input data for inserting a new short link.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub code: String,
    pub target_url: String,
}

impl NewShortUrl {
    pub fn new(code: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target_url: target_url.into(),
        }
    }
}
