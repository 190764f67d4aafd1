//! Session lifecycle: login, token exchange, verification and logout.

pub mod manager;

pub use manager::{AccessGrant, LoginOutcome, SessionManager};
