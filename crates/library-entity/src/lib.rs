//! # library-entity
//!
//! Domain entity models for the library backend. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod refresh_token;
pub mod user;
