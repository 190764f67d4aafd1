//! # library-database
//!
//! PostgreSQL connection management, the migration runner, and the
//! repositories backing principals, memberships and refresh tokens.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{
    MemoryRefreshTokenRepository, MemoryUserRepository, PgRefreshTokenRepository,
    PgUserRepository, RefreshTokenRepository, UserRepository,
};
