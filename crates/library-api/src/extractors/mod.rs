//! Custom Axum extractors.

pub mod auth;

pub use auth::{AccessUser, AdminUser, RefreshUser};
