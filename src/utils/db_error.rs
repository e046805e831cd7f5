//! Classification of PostgreSQL unique-violation errors.

use crate::domain::errors::UniqueField;

/// Constraint guarding `short_urls.code`.
pub const CODE_CONSTRAINT: &str = "short_urls_code_key";

/// Unique index over `md5(short_urls.target_url)`.
pub const TARGET_URL_CONSTRAINT: &str = "short_urls_target_url_key";

/// Returns which unique column a failed insert collided on, if any.
pub fn unique_violation_field(e: &sqlx::Error) -> Option<UniqueField> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint() {
        Some(CODE_CONSTRAINT) => Some(UniqueField::Code),
        Some(TARGET_URL_CONSTRAINT) => Some(UniqueField::TargetUrl),
        _ => None,
    }
}
