//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use library_auth::{
    JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, RefreshTokenStore,
    RegistrationService, SessionManager,
};
use library_core::config::AuthConfig;
use library_core::result::AppResult;
use library_database::repositories::{RefreshTokenRepository, UserRepository};

use crate::services::MembershipService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authentication configuration (cookie attributes, lifetimes).
    pub auth_config: Arc<AuthConfig>,
    /// User repository.
    pub user_repo: Arc<dyn UserRepository>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Account registration.
    pub registration: Arc<RegistrationService>,
    /// Library membership administration.
    pub membership: Arc<MembershipService>,
}

impl AppState {
    /// Wires the auth core on top of the given repositories.
    pub fn new(
        auth_config: &AuthConfig,
        user_repo: Arc<dyn UserRepository>,
        token_repo: Arc<dyn RefreshTokenRepository>,
    ) -> AppResult<Self> {
        let password_hasher = Arc::new(PasswordHasher::new());
        let jwt_encoder = Arc::new(JwtEncoder::new(auth_config)?);
        let jwt_decoder = Arc::new(JwtDecoder::new(auth_config)?);
        let refresh_store = Arc::new(RefreshTokenStore::new(token_repo, auth_config)?);

        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&user_repo),
            refresh_store,
            Arc::clone(&password_hasher),
            jwt_encoder,
            jwt_decoder,
        ));
        let registration = Arc::new(RegistrationService::new(
            Arc::clone(&user_repo),
            PasswordValidator::new(auth_config),
            password_hasher,
        ));
        let membership = Arc::new(MembershipService::new(Arc::clone(&user_repo)));

        Ok(Self {
            auth_config: Arc::new(auth_config.clone()),
            user_repo,
            session_manager,
            registration,
            membership,
        })
    }
}
