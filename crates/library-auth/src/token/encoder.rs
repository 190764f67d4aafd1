//! Access token creation.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use library_core::config::AuthConfig;
use library_core::error::AppError;
use library_entity::user::User;

use super::claims::Claims;
use super::signing_algorithm;

/// Creates signed access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    header: Header,
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("algorithm", &self.header.alg)
            .field("access_ttl", &self.access_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let access_ttl = Duration::try_minutes(config.access_token_ttl_minutes).ok_or_else(|| {
            AppError::configuration("auth.access_token_ttl_minutes is out of range")
        })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            header: Header::new(signing_algorithm(config)?),
            access_ttl,
        })
    }

    /// The configured access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Mints an access token for the user with the configured lifetime.
    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        self.mint_access_token(user, self.access_ttl)
    }

    /// Mints an access token expiring `ttl` from now.
    pub fn mint_access_token(&self, user: &User, ttl: Duration) -> Result<String, AppError> {
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::configuration("Access token expiry is out of range"))?;

        let claims = Claims {
            sub: user.id.to_string(),
            exp: expires_at.timestamp(),
            is_admin: user.is_admin(),
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }
}
