//! Failure taxonomy of the session core.

use library_core::error::{AppError, ErrorKind};
use thiserror::Error;

use crate::token::TokenError;

/// Errors surfaced by login, token exchange, verification and the admin gate.
///
/// The display text of each variant is the detail shown to callers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No refresh credential was presented.
    #[error("Authentication required.")]
    AuthRequired,
    /// The refresh value is unknown, expired, or its principal is gone.
    #[error("Refresh token is not valid.")]
    RefreshTokenNotValid,
    /// No access token was presented.
    #[error("Access token is required in the Authorization header.")]
    AccessTokenRequired,
    /// The access token is well signed but past its expiry.
    #[error("Access token has expired. Get a new one.")]
    AccessTokenExpired,
    /// The access token is malformed, badly signed, or names an unknown principal.
    #[error("Invalid token.")]
    AccessTokenInvalid,
    /// The principal lacks the required role.
    #[error("Authorization failed. User has no access.")]
    AuthorizationFailed,
    /// Unknown username or wrong password. Both causes share this variant.
    #[error("Invalid credentials.")]
    InvalidCredentials,
    /// A persistence failure below the session core.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl AuthError {
    /// The application error category this failure belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthRequired | Self::RefreshTokenNotValid | Self::InvalidCredentials => {
                ErrorKind::Authentication
            }
            Self::AccessTokenRequired
            | Self::AccessTokenExpired
            | Self::AccessTokenInvalid
            | Self::AuthorizationFailed => ErrorKind::Authorization,
            Self::Store(err) => err.kind,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing => Self::AccessTokenRequired,
            TokenError::Expired => Self::AccessTokenExpired,
            TokenError::Invalid => Self::AccessTokenInvalid,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(inner) => inner,
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_path_is_authentication_class() {
        for err in [
            AuthError::AuthRequired,
            AuthError::RefreshTokenNotValid,
            AuthError::InvalidCredentials,
        ] {
            assert_eq!(AppError::from(err).kind, ErrorKind::Authentication);
        }
    }

    #[test]
    fn test_access_path_is_authorization_class() {
        let app: AppError = AuthError::AccessTokenRequired.into();
        assert_eq!(app.kind, ErrorKind::Authorization);
        assert_eq!(
            app.message,
            "Access token is required in the Authorization header."
        );
    }

    #[test]
    fn test_store_error_passes_through() {
        let app: AppError = AuthError::Store(AppError::database("connection lost")).into();
        assert_eq!(app.kind, ErrorKind::Database);
        assert_eq!(app.message, "connection lost");
    }

    #[test]
    fn test_token_error_mapping() {
        assert!(matches!(
            AuthError::from(TokenError::Expired),
            AuthError::AccessTokenExpired
        ));
        assert!(matches!(
            AuthError::from(TokenError::Invalid),
            AuthError::AccessTokenInvalid
        ));
    }
}
