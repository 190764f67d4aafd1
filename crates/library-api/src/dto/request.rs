//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use library_entity::user::UserRole;

/// Login form (`application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Self-registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    /// Email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password, checked against the password policy.
    pub password: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Username.
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    /// Email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Role; defaults to `user`.
    #[serde(default)]
    pub role: UserRole,
}

/// Membership activation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ActivateMembershipRequest {
    /// Target user.
    pub user_id: i64,
    /// Contact information, required when the user has no membership yet.
    #[validate(length(max = 255))]
    pub contact_information: Option<String>,
}

/// Membership block request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockMembershipRequest {
    /// Target user.
    pub user_id: i64,
}
