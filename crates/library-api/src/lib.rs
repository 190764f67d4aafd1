//! # library-api
//!
//! HTTP API layer for the library backend built on Axum.
//!
//! Provides the auth and user-administration endpoints, the extractors that
//! resolve refresh-cookie, bearer and admin principals, the cookie helpers,
//! request logging and CORS middleware, and error mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
