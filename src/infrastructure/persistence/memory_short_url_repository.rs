//! Process-local implementation of the short URL repository.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::errors::{RepositoryError, UniqueField};
use crate::domain::repositories::ShortUrlRepository;

#[derive(Debug, Default)]
struct Tables {
    by_code: HashMap<String, ShortUrl>,
    code_by_target: HashMap<String, String>,
    next_id: i64,
}

/// In-memory repository backed by two hash maps under one lock.
///
/// Both indexes are checked and updated while holding the write lock, so
/// concurrent inserts see the same uniqueness guarantees as the PostgreSQL
/// constraints. Used by tests and by embedders without a database.
#[derive(Debug, Default)]
pub struct InMemoryShortUrlRepository {
    tables: RwLock<Tables>,
}

impl InMemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.tables.read().by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, RepositoryError> {
        Ok(self.tables.read().by_code.get(code).cloned())
    }

    async fn find_by_target(&self, target_url: &str) -> Result<Option<ShortUrl>, RepositoryError> {
        let tables = self.tables.read();

        Ok(tables
            .code_by_target
            .get(target_url)
            .and_then(|code| tables.by_code.get(code))
            .cloned())
    }

    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, RepositoryError> {
        let mut tables = self.tables.write();

        if tables.by_code.contains_key(&new_short_url.code) {
            return Err(RepositoryError::UniquenessConflict(UniqueField::Code));
        }
        if tables.code_by_target.contains_key(&new_short_url.target_url) {
            return Err(RepositoryError::UniquenessConflict(UniqueField::TargetUrl));
        }

        tables.next_id += 1;
        let record = ShortUrl::new(
            tables.next_id,
            new_short_url.code,
            new_short_url.target_url,
            Utc::now(),
        );

        tables
            .code_by_target
            .insert(record.target_url.clone(), record.code.clone());
        tables.by_code.insert(record.code.clone(), record.clone());

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn insert_and_find() {
        let repo = InMemoryShortUrlRepository::new();

        let created = repo
            .insert(NewShortUrl::new("abc123", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let by_code = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(by_code, created);

        let by_target = repo
            .find_by_target("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_target, created);
    }

    #[tokio::test]
    async fn lookups_are_exact() {
        let repo = InMemoryShortUrlRepository::new();
        repo.insert(NewShortUrl::new("AbC123", "https://example.com/Path"))
            .await
            .unwrap();

        assert!(repo.find_by_code("abc123").await.unwrap().is_none());
        assert!(
            repo.find_by_target("https://example.com/path")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn code_conflict() {
        let repo = InMemoryShortUrlRepository::new();
        repo.insert(NewShortUrl::new("abc123", "https://one.com"))
            .await
            .unwrap();

        let err = repo
            .insert(NewShortUrl::new("abc123", "https://two.com"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::UniquenessConflict(UniqueField::Code)
        ));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn target_conflict() {
        let repo = InMemoryShortUrlRepository::new();
        repo.insert(NewShortUrl::new("abc123", "https://one.com"))
            .await
            .unwrap();

        let err = repo
            .insert(NewShortUrl::new("xyz789", "https://one.com"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::UniquenessConflict(UniqueField::TargetUrl)
        ));
        assert!(repo.find_by_code("xyz789").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_inserts_of_same_code() {
        let repo = Arc::new(InMemoryShortUrlRepository::new());
        let mut handles = vec![];

        for i in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(NewShortUrl::new("same01", format!("https://e{i}.com")))
                    .await
            }));
        }

        let mut won = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                won += 1;
            }
        }

        assert_eq!(won, 1);
        assert_eq!(repo.len(), 1);
    }
}
