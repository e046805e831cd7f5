//! Availability checks for codes and target URLs.

use std::sync::Arc;

use crate::domain::entities::ShortUrl;
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::code_generator::is_reserved_code;

/// What an identifier passed to [`AvailabilityChecker`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Code,
    Target,
}

/// Read-only view over the repository answering "is this already used?".
///
/// Every call is a fresh query. A code reported free can still be taken
/// before the insert runs, so callers must treat the answer as a hint and
/// rely on the insert's uniqueness check.
pub struct AvailabilityChecker {
    repository: Arc<dyn ShortUrlRepository>,
}

impl AvailabilityChecker {
    pub fn new(repository: Arc<dyn ShortUrlRepository>) -> Self {
        Self { repository }
    }

    /// Returns the record currently holding `identifier`, if any.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError::Database`].
    pub async fn find_existing(
        &self,
        identifier: &str,
        kind: IdentifierKind,
    ) -> Result<Option<ShortUrl>, RepositoryError> {
        match kind {
            IdentifierKind::Code => self.repository.find_by_code(identifier).await,
            IdentifierKind::Target => self.repository.find_by_target(identifier).await,
        }
    }

    /// Returns true if no record uses `identifier`.
    ///
    /// Reserved route names are never available as codes.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError::Database`].
    pub async fn is_available(
        &self,
        identifier: &str,
        kind: IdentifierKind,
    ) -> Result<bool, RepositoryError> {
        if kind == IdentifierKind::Code && is_reserved_code(identifier) {
            return Ok(false);
        }

        Ok(self.find_existing(identifier, kind).await?.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockShortUrlRepository;
    use chrono::Utc;

    fn record(code: &str, url: &str) -> ShortUrl {
        ShortUrl::new(1, code.to_string(), url.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_code_available_when_absent() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(None));

        let checker = AvailabilityChecker::new(Arc::new(repo));
        assert!(
            checker
                .is_available("abc123", IdentifierKind::Code)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_code_unavailable_when_present() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(record(code, "https://example.com"))));

        let checker = AvailabilityChecker::new(Arc::new(repo));
        assert!(
            !checker
                .is_available("abc123", IdentifierKind::Code)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_target_lookup_uses_target_query() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_code().times(0);
        repo.expect_find_by_target()
            .withf(|url| url == "https://example.com/a")
            .times(1)
            .returning(|url| Ok(Some(record("abc123", url))));

        let checker = AvailabilityChecker::new(Arc::new(repo));
        let existing = checker
            .find_existing("https://example.com/a", IdentifierKind::Target)
            .await
            .unwrap();

        assert_eq!(existing.unwrap().code, "abc123");
    }

    #[tokio::test]
    async fn test_reserved_code_never_available() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_code().times(0);

        let checker = AvailabilityChecker::new(Arc::new(repo));
        assert!(
            !checker
                .is_available("health", IdentifierKind::Code)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_every_call_queries_repository() {
        let mut repo = MockShortUrlRepository::new();
        let mut calls = 0;
        repo.expect_find_by_code().times(2).returning(move |code| {
            calls += 1;
            if calls == 1 {
                Ok(None)
            } else {
                Ok(Some(record(code, "https://example.com")))
            }
        });

        let checker = AvailabilityChecker::new(Arc::new(repo));
        assert!(checker.is_available("race01", IdentifierKind::Code).await.unwrap());
        assert!(!checker.is_available("race01", IdentifierKind::Code).await.unwrap());
    }
}
