//! Database error types.

use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Errors surfaced by the repositories.
#[derive(Debug, Error)]
pub enum DbError {
    /// A unique constraint rejected the write. The API layer maps this
    /// to 409 Conflict (duplicate application, duplicate save/hide,
    /// duplicate email).
    #[error("unique constraint violation")]
    UniqueViolation,

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            if db.is_unique_violation() {
                return DbError::UniqueViolation;
            }
        }
        DbError::Sqlx(e)
    }
}
