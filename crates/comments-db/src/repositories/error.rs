//! SQLx-to-domain error translation

use comments_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Collapse a driver error into the storage variant the domain exposes
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}
