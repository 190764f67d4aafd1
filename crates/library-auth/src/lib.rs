//! # library-auth
//!
//! Credential handling and session core for the library backend.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and the password strength policy
//! - `token`: signed access tokens and opaque refresh token values
//! - `refresh`: persistence and revocation of refresh tokens
//! - `session`: login, token exchange, per-request verification, logout
//! - `rbac`: admin gate over a resolved principal
//! - `registration`: creation of new principals

pub mod error;
pub mod password;
pub mod rbac;
pub mod refresh;
pub mod registration;
pub mod session;
pub mod token;

pub use error::AuthError;
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::require_admin;
pub use refresh::RefreshTokenStore;
pub use registration::{NewAccount, RegistrationService};
pub use session::{AccessGrant, LoginOutcome, SessionManager};
pub use token::{Claims, JwtDecoder, JwtEncoder, TokenError, generate_opaque_token};
