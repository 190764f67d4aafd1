//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound for `access_token_ttl_minutes` (one day).
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 60 * 24;

/// Upper bound for `refresh_token_ttl_seconds` (one year).
pub const MAX_REFRESH_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24 * 365;

/// Upper bound for `refresh_token_length`.
pub const MAX_REFRESH_TOKEN_LENGTH: usize = 1024;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access token signing.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Signing algorithm name (HS256, HS384 or HS512).
    #[serde(default = "default_jwt_algorithm")]
    pub jwt_algorithm: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: i64,
    /// Refresh token TTL in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: i64,
    /// Length of the opaque refresh token value.
    #[serde(default = "default_refresh_length")]
    pub refresh_token_length: usize,
    /// Name of the cookie carrying the refresh token.
    #[serde(default = "default_refresh_cookie")]
    pub refresh_token_cookie: String,
    /// Whether the refresh cookie carries the `Secure` attribute.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
    /// Domain attribute of the refresh cookie.
    #[serde(default)]
    pub cookie_domain: Option<String>,
    /// Minimum password length (inclusive).
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length (inclusive).
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Symbols that satisfy the "special character" password rule.
    #[serde(default = "default_special_symbols")]
    pub password_special_symbols: String,
}

impl AuthConfig {
    /// Rejects settings that cannot produce a working auth core.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.access_token_ttl_minutes <= 0 || self.refresh_token_ttl_seconds <= 0 {
            return Err(AppError::configuration(
                "auth token lifetimes must be positive",
            ));
        }
        if self.access_token_ttl_minutes > MAX_ACCESS_TOKEN_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.access_token_ttl_minutes must not exceed {MAX_ACCESS_TOKEN_TTL_MINUTES}"
            )));
        }
        if self.refresh_token_ttl_seconds > MAX_REFRESH_TOKEN_TTL_SECONDS {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_ttl_seconds must not exceed {MAX_REFRESH_TOKEN_TTL_SECONDS}"
            )));
        }
        if self.refresh_token_length == 0 || self.refresh_token_length > MAX_REFRESH_TOKEN_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_length must be between 1 and {MAX_REFRESH_TOKEN_LENGTH}"
            )));
        }
        if self.password_min_length == 0 || self.password_min_length > self.password_max_length {
            return Err(AppError::configuration(format!(
                "invalid password length bounds: min {} / max {}",
                self.password_min_length, self.password_max_length
            )));
        }
        if self.password_special_symbols.is_empty() {
            return Err(AppError::configuration(
                "auth.password_special_symbols must not be empty",
            ));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_algorithm: default_jwt_algorithm(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_seconds: default_refresh_ttl(),
            refresh_token_length: default_refresh_length(),
            refresh_token_cookie: default_refresh_cookie(),
            secure_cookies: default_secure_cookies(),
            cookie_domain: None,
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            password_special_symbols: default_special_symbols(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_ttl() -> i64 {
    10
}

fn default_refresh_ttl() -> i64 {
    60 * 60 * 24 * 21
}

fn default_refresh_length() -> usize {
    64
}

fn default_refresh_cookie() -> String {
    "refreshToken".to_string()
}

fn default_secure_cookies() -> bool {
    true
}

fn default_password_min() -> usize {
    6
}

fn default_password_max() -> usize {
    128
}

fn default_special_symbols() -> String {
    "!@#%^&*".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh_token_ttl_seconds, 1_814_400);
        assert_eq!(config.refresh_token_length, 64);
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: String::new(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let config = AuthConfig {
            access_token_ttl_minutes: 0,
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_lifetimes_rejected() {
        let refresh = AuthConfig {
            refresh_token_ttl_seconds: i64::MAX / 1000,
            ..AuthConfig::default()
        };
        assert!(refresh.validate().is_err());

        let access = AuthConfig {
            access_token_ttl_minutes: MAX_ACCESS_TOKEN_TTL_MINUTES + 1,
            ..AuthConfig::default()
        };
        assert!(access.validate().is_err());
    }

    #[test]
    fn test_refresh_token_length_bounds() {
        let longest = AuthConfig {
            refresh_token_length: MAX_REFRESH_TOKEN_LENGTH,
            ..AuthConfig::default()
        };
        assert!(longest.validate().is_ok());

        let too_long = AuthConfig {
            refresh_token_length: MAX_REFRESH_TOKEN_LENGTH + 1,
            ..AuthConfig::default()
        };
        assert!(too_long.validate().is_err());
    }
}
