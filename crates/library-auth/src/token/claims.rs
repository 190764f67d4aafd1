//! Claims carried by an access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims payload embedded in every access token.
///
/// The admin flag is a snapshot taken at issuance. Authorization decisions
/// use the role of the principal resolved from `sub`, not this flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal id, as a decimal string.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Whether the principal was an admin when the token was minted.
    pub is_admin: bool,
}

impl Claims {
    /// Returns the principal id encoded in the subject claim.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parsing() {
        let claims = Claims {
            sub: "42".to_string(),
            exp: 0,
            is_admin: false,
        };
        assert_eq!(claims.user_id(), Some(42));

        let bogus = Claims {
            sub: "alice".to_string(),
            ..claims
        };
        assert_eq!(bogus.user_id(), None);
    }
}
