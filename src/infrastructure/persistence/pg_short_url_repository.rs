//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::db_error::unique_violation_field;

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    code: String,
    target_url: String,
    created_at: DateTime<Utc>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(row.id, row.code, row.target_url, row.created_at)
    }
}

/// PostgreSQL repository for short URL storage and retrieval.
///
/// Uniqueness of `code` and `target_url` is enforced by the table's
/// constraints, so concurrent inserts never produce duplicates.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, RepositoryError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, code, target_url, created_at
            FROM short_urls
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn find_by_target(&self, target_url: &str) -> Result<Option<ShortUrl>, RepositoryError> {
        // md5 predicate lets the planner use the unique index
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, code, target_url, created_at
            FROM short_urls
            WHERE md5(target_url) = md5($1) AND target_url = $1
            "#,
        )
        .bind(target_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, RepositoryError> {
        let result = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (code, target_url)
            VALUES ($1, $2)
            RETURNING id, code, target_url, created_at
            "#,
        )
        .bind(&new_short_url.code)
        .bind(&new_short_url.target_url)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) => match unique_violation_field(&e) {
                Some(field) => Err(RepositoryError::UniquenessConflict(field)),
                None => Err(RepositoryError::Database(e)),
            },
        }
    }
}
