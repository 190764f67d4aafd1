//! Repository traits and their PostgreSQL / in-memory implementations.

pub mod memory;
pub mod refresh_token;
pub mod user;

pub use memory::{MemoryRefreshTokenRepository, MemoryUserRepository};
pub use refresh_token::{PgRefreshTokenRepository, RefreshTokenRepository};
pub use user::{PgUserRepository, UserRepository};

use library_core::error::{AppError, ErrorKind};

/// Map a sqlx error to an [`AppError`], turning unique violations into conflicts.
pub(crate) fn map_db_error(err: sqlx::Error, context: &str) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let message = format!("{context}: duplicate value");
            return AppError::with_source(ErrorKind::Conflict, message, err);
        }
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}
