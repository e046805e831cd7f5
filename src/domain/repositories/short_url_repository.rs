//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;

/// Persistence interface consumed by the allocation engine.
///
/// Implementations must enforce uniqueness of `code` (and of `target_url`)
/// atomically inside [`ShortUrlRepository::insert`]; the engine's
/// availability checks are advisory only.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortUrlRepository`] - Process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds a record by its exact, case-sensitive code.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] on storage failures.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, RepositoryError>;

    /// Finds the record created for a target URL, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] on storage failures.
    async fn find_by_target(&self, target_url: &str) -> Result<Option<ShortUrl>, RepositoryError>;

    /// Inserts a record if neither its code nor its target is taken.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::UniquenessConflict`] naming the column that
    /// collided, or [`RepositoryError::Database`] on storage failures.
    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, RepositoryError>;
}
