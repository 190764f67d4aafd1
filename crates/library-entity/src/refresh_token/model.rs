//! Refresh token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted, opaque refresh token.
///
/// The token value is stored as issued. Revocation back-dates `expires_at`;
/// rows are never deleted on logout.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Unique record identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: i64,
    /// Opaque random token value.
    #[serde(skip_serializing)]
    pub token: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Whether `now` is past the record's expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether the record is expired (naturally or by revocation).
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
