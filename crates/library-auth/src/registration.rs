//! Creation of new principals.

use std::sync::Arc;

use tracing::info;

use library_core::error::AppError;
use library_database::repositories::UserRepository;
use library_entity::user::{CreateUser, User, UserRole};

use crate::password::{PasswordHasher, PasswordValidator};

/// Input for a new account; the password is still plaintext.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Role to assign.
    pub role: UserRole,
}

/// Validates, hashes and persists new principals.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    user_repo: Arc<dyn UserRepository>,
    password_validator: PasswordValidator,
    password_hasher: Arc<PasswordHasher>,
}

impl RegistrationService {
    /// Creates a new registration service.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_validator: PasswordValidator,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            user_repo,
            password_validator,
            password_hasher,
        }
    }

    /// Registers a new account. Email uniqueness is checked before username.
    pub async fn register(&self, account: NewAccount) -> Result<User, AppError> {
        self.password_validator.validate(&account.password)?;

        if self.user_repo.find_by_email(&account.email).await?.is_some() {
            return Err(AppError::validation("Email is already taken."));
        }
        if self
            .user_repo
            .find_by_username(&account.username)
            .await?
            .is_some()
        {
            return Err(AppError::validation("Username is already taken."));
        }

        let password_hash = self.password_hasher.hash_password(&account.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username: account.username,
                email: account.email,
                password_hash,
                role: account.role,
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "User registered");
        Ok(user)
    }
}
