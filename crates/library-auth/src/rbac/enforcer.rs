//! Admin gate.

use tracing::warn;

use library_entity::user::{User, UserRole};

use crate::error::AuthError;

/// Passes the principal through unchanged if it is an admin.
pub fn require_admin(user: User) -> Result<User, AuthError> {
    match user.role {
        UserRole::Admin => Ok(user),
        UserRole::User => {
            warn!(user_id = user.id, "Admin access denied");
            Err(AuthError::AuthorizationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: UserRole) -> User {
        let now = Utc::now();
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password_hash: String::new(),
            role,
            library_member_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_admin_passes_through() {
        let admin = require_admin(user(UserRole::Admin)).unwrap();
        assert_eq!(admin.id, 1);
    }

    #[test]
    fn test_user_is_denied() {
        assert!(matches!(
            require_admin(user(UserRole::User)),
            Err(AuthError::AuthorizationFailed)
        ));
    }
}
