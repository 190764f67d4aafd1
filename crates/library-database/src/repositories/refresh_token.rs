//! Refresh token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use library_core::result::AppResult;
use library_entity::refresh_token::RefreshToken;

use super::map_db_error;

/// Storage of opaque refresh token records.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + std::fmt::Debug {
    /// Persist a new record. A duplicate token value yields a conflict.
    async fn insert(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken>;

    /// Exact-match lookup by token value.
    async fn find_by_value(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Lookup by record id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RefreshToken>>;

    /// Overwrite the expiry of a record. Returns `false` if no record matched.
    async fn set_expiry(&self, id: Uuid, expires_at: DateTime<Utc>) -> AppResult<bool>;
}

/// PostgreSQL-backed [`RefreshTokenRepository`].
#[derive(Debug, Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn insert(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        sqlx::query_as::<_, RefreshToken>(
            r#"INSERT INTO refresh_tokens (id, user_id, token, expires_at)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to create refresh token"))
    }

    async fn find_by_value(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find refresh token"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find refresh token by id"))
    }

    async fn set_expiry(&self, id: Uuid, expires_at: DateTime<Utc>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET expires_at = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to update refresh token expiry"))?;

        Ok(result.rows_affected() > 0)
    }
}
