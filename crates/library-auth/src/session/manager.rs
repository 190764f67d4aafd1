//! Session lifecycle manager.
//!
//! A session moves from anonymous to refresh-backed at login, gains
//! short-lived access tokens through exchange, and ends when its refresh
//! token is revoked at logout or simply expires.

use std::sync::Arc;

use tracing::{info, warn};

use library_database::repositories::UserRepository;
use library_entity::refresh_token::RefreshToken;
use library_entity::user::User;

use crate::error::AuthError;
use crate::password::PasswordHasher;
use crate::refresh::RefreshTokenStore;
use crate::token::{JwtDecoder, JwtEncoder, TokenError};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// The refresh token issued for this login.
    pub refresh_token: RefreshToken,
}

/// Result of exchanging a refresh token.
#[derive(Debug, Clone)]
pub struct AccessGrant {
    /// The principal the token was minted for.
    pub user: User,
    /// Signed access token.
    pub access_token: String,
}

/// Orchestrates credential checks and token issuance.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// User repository.
    user_repo: Arc<dyn UserRepository>,
    /// Refresh token persistence.
    refresh_store: Arc<RefreshTokenStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Access token encoder.
    jwt_encoder: Arc<JwtEncoder>,
    /// Access token decoder.
    jwt_decoder: Arc<JwtDecoder>,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        refresh_store: Arc<RefreshTokenStore>,
        password_hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            refresh_store,
            password_hasher,
            jwt_encoder,
            jwt_decoder,
        }
    }

    /// The refresh token store backing this manager.
    pub fn refresh_store(&self) -> &RefreshTokenStore {
        &self.refresh_store
    }

    /// Verifies a username and password and issues a refresh token.
    ///
    /// An unknown username and a wrong password fail identically.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let Some(user) = self.user_repo.find_by_username(username).await? else {
            warn!("Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)
        {
            warn!(user_id = user.id, "Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let refresh_token = self.refresh_store.create(user.id).await?;
        info!(user_id = user.id, token_id = %refresh_token.id, "User logged in");

        Ok(LoginOutcome {
            user,
            refresh_token,
        })
    }

    /// Resolves the principal behind a presented refresh token.
    ///
    /// The stored record is only read, never modified.
    pub async fn verify_refresh(&self, value: Option<&str>) -> Result<User, AuthError> {
        let value = value
            .filter(|v| !v.is_empty())
            .ok_or(AuthError::AuthRequired)?;

        let record = self
            .refresh_store
            .find_by_value(value)
            .await?
            .ok_or(AuthError::RefreshTokenNotValid)?;

        if self.refresh_store.is_expired(&record) {
            return Err(AuthError::RefreshTokenNotValid);
        }

        self.user_repo
            .find_by_id(record.user_id)
            .await?
            .ok_or(AuthError::RefreshTokenNotValid)
    }

    /// Exchanges a refresh token for a fresh access token.
    pub async fn exchange(&self, value: Option<&str>) -> Result<AccessGrant, AuthError> {
        let user = self.verify_refresh(value).await?;
        let access_token = self.jwt_encoder.generate_access_token(&user)?;

        info!(user_id = user.id, "Access token issued");
        Ok(AccessGrant { user, access_token })
    }

    /// Resolves the principal behind a presented access token.
    ///
    /// The principal is reloaded so the returned role is the current one,
    /// not the snapshot embedded in the token.
    pub async fn verify_access(&self, token: Option<&str>) -> Result<User, AuthError> {
        let token = token.ok_or(AuthError::AccessTokenRequired)?;
        let claims = self.jwt_decoder.decode_access_token(token)?;

        let user_id = claims.user_id().ok_or(TokenError::Invalid)?;
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::AccessTokenInvalid)
    }

    /// Revokes the presented refresh token, if any.
    ///
    /// Missing or unknown tokens are not an error.
    pub async fn logout(&self, value: Option<&str>) -> Result<(), AuthError> {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return Ok(());
        };

        if let Some(record) = self.refresh_store.find_by_value(value).await? {
            self.refresh_store.revoke(record.id).await?;
            info!(user_id = record.user_id, token_id = %record.id, "User logged out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use library_core::config::AuthConfig;
    use library_database::{MemoryRefreshTokenRepository, MemoryUserRepository};
    use library_entity::user::{CreateUser, UserRole};

    struct Harness {
        manager: SessionManager,
        users: MemoryUserRepository,
        encoder: Arc<JwtEncoder>,
    }

    fn harness() -> Harness {
        let config = AuthConfig::default();
        let users = MemoryUserRepository::new();
        let refresh_store = Arc::new(
            RefreshTokenStore::new(Arc::new(MemoryRefreshTokenRepository::new()), &config)
                .unwrap(),
        );
        let encoder = Arc::new(JwtEncoder::new(&config).unwrap());
        let manager = SessionManager::new(
            Arc::new(users.clone()),
            refresh_store,
            Arc::new(PasswordHasher::new()),
            encoder.clone(),
            Arc::new(JwtDecoder::new(&config).unwrap()),
        );
        Harness {
            manager,
            users,
            encoder,
        }
    }

    async fn add_user(users: &MemoryUserRepository, username: &str, role: UserRole) -> User {
        let password_hash = PasswordHasher::new().hash_password("Pwd12345!").unwrap();
        users
            .create(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@x.com"),
                password_hash,
                role,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_exchange_verify() {
        let h = harness();
        let alice = add_user(&h.users, "alice", UserRole::User).await;

        let outcome = h.manager.login("alice", "Pwd12345!").await.unwrap();
        assert_eq!(outcome.user.id, alice.id);

        let grant = h
            .manager
            .exchange(Some(&outcome.refresh_token.token))
            .await
            .unwrap();
        let resolved = h
            .manager
            .verify_access(Some(&grant.access_token))
            .await
            .unwrap();
        assert_eq!(resolved.username, "alice");
        assert_eq!(resolved.role, UserRole::User);

        assert!(matches!(
            crate::rbac::require_admin(resolved),
            Err(AuthError::AuthorizationFailed)
        ));
    }

    #[tokio::test]
    async fn test_role_is_reloaded_not_taken_from_token() {
        let h = harness();
        let alice = add_user(&h.users, "alice", UserRole::User).await;
        let token = h.encoder.generate_access_token(&alice).unwrap();

        let config = AuthConfig::default();
        let claims = JwtDecoder::new(&config)
            .unwrap()
            .decode_access_token(&token)
            .unwrap();
        assert!(!claims.is_admin);

        assert!(h.users.set_role(alice.id, UserRole::Admin).await);
        let promoted = h.manager.verify_access(Some(&token)).await.unwrap();
        assert_eq!(promoted.role, UserRole::Admin);
        assert!(crate::rbac::require_admin(promoted).is_ok());

        assert!(h.users.set_role(alice.id, UserRole::User).await);
        let demoted = h.manager.verify_access(Some(&token)).await.unwrap();
        assert!(matches!(
            crate::rbac::require_admin(demoted),
            Err(AuthError::AuthorizationFailed)
        ));
    }

    #[tokio::test]
    async fn test_bad_credentials_are_indistinguishable() {
        let h = harness();
        add_user(&h.users, "alice", UserRole::User).await;

        let wrong_password = h.manager.login("alice", "Wrong1234!").await.unwrap_err();
        let unknown_user = h.manager.login("mallory", "Pwd12345!").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_exchange_without_token() {
        let h = harness();
        assert!(matches!(
            h.manager.exchange(None).await,
            Err(AuthError::AuthRequired)
        ));
        assert!(matches!(
            h.manager.exchange(Some("")).await,
            Err(AuthError::AuthRequired)
        ));
        assert!(matches!(
            h.manager.exchange(Some("unknown")).await,
            Err(AuthError::RefreshTokenNotValid)
        ));
    }

    #[tokio::test]
    async fn test_exchange_after_revoke_fails() {
        let h = harness();
        add_user(&h.users, "alice", UserRole::User).await;
        let outcome = h.manager.login("alice", "Pwd12345!").await.unwrap();
        let value = outcome.refresh_token.token.clone();

        h.manager.refresh_store().revoke(outcome.refresh_token.id).await.unwrap();
        assert!(matches!(
            h.manager.exchange(Some(&value)).await,
            Err(AuthError::RefreshTokenNotValid)
        ));
    }

    #[tokio::test]
    async fn test_orphaned_refresh_token_is_not_valid() {
        let h = harness();
        let alice = add_user(&h.users, "alice", UserRole::User).await;
        let outcome = h.manager.login("alice", "Pwd12345!").await.unwrap();

        h.users.delete(alice.id).await;
        assert!(matches!(
            h.manager.exchange(Some(&outcome.refresh_token.token)).await,
            Err(AuthError::RefreshTokenNotValid)
        ));
    }

    #[tokio::test]
    async fn test_access_verification_failures() {
        let h = harness();
        let alice = add_user(&h.users, "alice", UserRole::User).await;

        assert!(matches!(
            h.manager.verify_access(None).await,
            Err(AuthError::AccessTokenRequired)
        ));
        assert!(matches!(
            h.manager.verify_access(Some("garbage")).await,
            Err(AuthError::AccessTokenInvalid)
        ));

        let expired = h
            .encoder
            .mint_access_token(&alice, Duration::seconds(-1))
            .unwrap();
        assert!(matches!(
            h.manager.verify_access(Some(&expired)).await,
            Err(AuthError::AccessTokenExpired)
        ));

        let live = h.encoder.generate_access_token(&alice).unwrap();
        h.users.delete(alice.id).await;
        assert!(matches!(
            h.manager.verify_access(Some(&live)).await,
            Err(AuthError::AccessTokenInvalid)
        ));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let h = harness();
        add_user(&h.users, "alice", UserRole::User).await;
        let outcome = h.manager.login("alice", "Pwd12345!").await.unwrap();
        let value = outcome.refresh_token.token.clone();

        h.manager.logout(Some(&value)).await.unwrap();
        h.manager.logout(Some(&value)).await.unwrap();
        h.manager.logout(None).await.unwrap();
        h.manager.logout(Some("never-issued")).await.unwrap();

        assert!(matches!(
            h.manager.exchange(Some(&value)).await,
            Err(AuthError::RefreshTokenNotValid)
        ));
    }

    #[tokio::test]
    async fn test_logout_leaves_other_sessions_alive() {
        let h = harness();
        add_user(&h.users, "alice", UserRole::User).await;
        let laptop = h.manager.login("alice", "Pwd12345!").await.unwrap();
        let phone = h.manager.login("alice", "Pwd12345!").await.unwrap();

        h.manager.logout(Some(&laptop.refresh_token.token)).await.unwrap();
        assert!(h.manager.exchange(Some(&phone.refresh_token.token)).await.is_ok());
    }
}
