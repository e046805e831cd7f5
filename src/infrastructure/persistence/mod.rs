//! Short URL repository implementations.
//!
//! - [`PgShortUrlRepository`] - PostgreSQL storage
//! - [`InMemoryShortUrlRepository`] - Process-local storage for tests and embedding

pub mod memory_short_url_repository;
pub mod pg_short_url_repository;

pub use memory_short_url_repository::InMemoryShortUrlRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
