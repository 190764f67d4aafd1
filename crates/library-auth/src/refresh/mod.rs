//! Refresh token persistence and revocation.

pub mod store;

pub use store::RefreshTokenStore;
