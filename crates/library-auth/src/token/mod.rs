//! Access token encoding/decoding and opaque refresh token values.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod opaque;

pub use claims::Claims;
pub use decoder::{JwtDecoder, TokenError};
pub use encoder::JwtEncoder;
pub use opaque::generate_opaque_token;

use jsonwebtoken::Algorithm;

use library_core::config::AuthConfig;
use library_core::error::AppError;

/// Parse the configured signing algorithm.
///
/// The signing secret is symmetric, so only HMAC algorithms are accepted.
pub fn signing_algorithm(config: &AuthConfig) -> Result<Algorithm, AppError> {
    match config.jwt_algorithm.to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AppError::configuration(format!(
            "Unsupported JWT algorithm '{other}': expected HS256, HS384 or HS512"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_algorithms_accepted() {
        let mut config = AuthConfig::default();
        assert_eq!(signing_algorithm(&config).unwrap(), Algorithm::HS256);
        config.jwt_algorithm = "hs512".to_string();
        assert_eq!(signing_algorithm(&config).unwrap(), Algorithm::HS512);
    }

    #[test]
    fn test_asymmetric_algorithm_rejected() {
        let config = AuthConfig {
            jwt_algorithm: "RS256".to_string(),
            ..AuthConfig::default()
        };
        assert!(signing_algorithm(&config).is_err());
    }
}
