//! Response DTOs.

use serde::{Deserialize, Serialize};

use library_entity::user::{MembershipStatus, User, UserRole};

/// Hint returned alongside a freshly issued access token.
pub const ACCESS_TOKEN_DETAIL: &str = "Use the access_token in the 'Authorization' header in the format 'Bearer <token>' to access the API functions";

/// Plain acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    /// Human-readable detail.
    pub detail: String,
}

impl DetailResponse {
    /// Creates a detail response.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Result of a token exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// Signed access token.
    pub access_token: String,
    /// Usage hint.
    pub detail: String,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// The caller as seen through an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// User id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Current role.
    pub role: UserRole,
    /// Membership record, if any.
    pub library_member_id: Option<i64>,
}

impl From<User> for WhoAmIResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            library_member_id: user.library_member_id,
        }
    }
}

/// Membership status after an administrative change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipStatusResponse {
    /// Target user.
    pub user_id: i64,
    /// Status after the change.
    pub current_membership_status: MembershipStatus,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
}
