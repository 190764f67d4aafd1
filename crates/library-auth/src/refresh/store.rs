//! Refresh token storage operations wrapping the database repository.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use library_core::config::AuthConfig;
use library_core::error::AppError;
use library_database::repositories::RefreshTokenRepository;
use library_entity::refresh_token::RefreshToken;

use crate::token::generate_opaque_token;

/// How far into the past a revoked token's expiry is moved.
const REVOCATION_BACKDATE_DAYS: i64 = 1;

/// Issues, looks up and revokes refresh tokens.
///
/// Revocation back-dates the expiry. There is no separate revoked flag, so
/// [`RefreshTokenStore::is_expired`] covers both natural and explicit expiry.
#[derive(Debug, Clone)]
pub struct RefreshTokenStore {
    repo: Arc<dyn RefreshTokenRepository>,
    lifetime: Duration,
    token_length: usize,
}

impl RefreshTokenStore {
    /// Creates a new refresh token store.
    pub fn new(
        repo: Arc<dyn RefreshTokenRepository>,
        config: &AuthConfig,
    ) -> Result<Self, AppError> {
        let lifetime = Duration::try_seconds(config.refresh_token_ttl_seconds).ok_or_else(|| {
            AppError::configuration("auth.refresh_token_ttl_seconds is out of range")
        })?;

        Ok(Self {
            repo,
            lifetime,
            token_length: config.refresh_token_length,
        })
    }

    /// Lifetime of newly issued tokens.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issues a new refresh token for the principal.
    ///
    /// The returned record holds the plaintext value, which is what is stored.
    pub async fn create(&self, user_id: i64) -> Result<RefreshToken, AppError> {
        let value = generate_opaque_token(self.token_length);
        let expires_at = Utc::now()
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AppError::configuration("Refresh token expiry is out of range"))?;

        let record = self.repo.insert(user_id, &value, expires_at).await?;
        info!(user_id, token_id = %record.id, "Refresh token issued");
        Ok(record)
    }

    /// Exact-match lookup by opaque value.
    pub async fn find_by_value(&self, value: &str) -> Result<Option<RefreshToken>, AppError> {
        self.repo.find_by_value(value).await
    }

    /// Lookup by record id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, AppError> {
        self.repo.find_by_id(id).await
    }

    /// Revokes a token by moving its expiry into the past. Unknown ids are a no-op.
    pub async fn revoke(&self, id: Uuid) -> Result<(), AppError> {
        let expires_at = Utc::now() - Duration::days(REVOCATION_BACKDATE_DAYS);
        if self.repo.set_expiry(id, expires_at).await? {
            info!(token_id = %id, "Refresh token revoked");
        } else {
            debug!(token_id = %id, "Revocation skipped: no such refresh token");
        }
        Ok(())
    }

    /// Whether the record is past its expiry.
    pub fn is_expired(&self, record: &RefreshToken) -> bool {
        record.is_expired()
    }
}
