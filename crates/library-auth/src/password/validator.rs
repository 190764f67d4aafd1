//! Password strength policy for new passwords.

use library_core::config::AuthConfig;
use library_core::error::AppError;

/// Message returned when a password fails the policy.
pub const WEAK_PASSWORD_MESSAGE: &str =
    "Password must contain at least one letter, one digit and one special symbol";

/// Validates password strength against the configured policy.
///
/// A password is strong when its length lies within the inclusive bounds,
/// it contains at least one ASCII digit, one ASCII letter and one of the
/// configured special symbols, and every character is ASCII alphanumeric
/// or ASCII punctuation.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
    special_symbols: String,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length,
            special_symbols: config.password_special_symbols.clone(),
        }
    }

    /// Whether the password satisfies the policy.
    pub fn is_strong(&self, password: &str) -> bool {
        // All accepted characters are ASCII, so byte length equals char count.
        if !password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c.is_ascii_punctuation())
        {
            return false;
        }
        if password.len() < self.min_length || password.len() > self.max_length {
            return false;
        }

        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
        let has_symbol = password.chars().any(|c| self.special_symbols.contains(c));

        has_digit && has_letter && has_symbol
    }

    /// Validates a password, returning a validation error if it is weak.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length || length > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be between {} and {} characters long",
                self.min_length, self.max_length
            )));
        }
        if !self.is_strong(password) {
            return Err(AppError::validation(WEAK_PASSWORD_MESSAGE));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_strong_passwords() {
        let v = validator();
        assert!(v.is_strong("Test_password1!"));
        assert!(v.is_strong("Pwd12345!"));
        assert!(v.is_strong("a1!b2@"));
    }

    #[test]
    fn test_missing_classes() {
        let v = validator();
        assert!(!v.is_strong(""));
        assert!(!v.is_strong("alllowercase1"));
        assert!(!v.is_strong("NOSPECIAL1"));
        assert!(!v.is_strong("NoDigits!!"));
        assert!(!v.is_strong("123456!!"));
    }

    #[test]
    fn test_below_configured_minimum() {
        let config = AuthConfig {
            password_min_length: 8,
            ..AuthConfig::default()
        };
        let v = PasswordValidator::new(&config);
        assert!(!v.is_strong("short1!"));
        assert!(v.is_strong("longer1!"));
    }

    #[test]
    fn test_inclusive_bounds() {
        let v = validator();
        assert!(v.is_strong("ab12!@"));
        assert!(!v.is_strong("ab12!"));

        let at_max = format!("a1!{}", "x".repeat(125));
        assert_eq!(at_max.len(), 128);
        assert!(v.is_strong(&at_max));
        assert!(!v.is_strong(&format!("{at_max}y")));
    }

    #[test]
    fn test_non_ascii_rejected() {
        let v = validator();
        assert!(!v.is_strong("Pässwort1!"));
        assert!(!v.is_strong("with space1!"));
    }

    #[test]
    fn test_validate_reports_reason() {
        let v = validator();
        assert!(v.validate("Pwd12345!").is_ok());
        let err = v.validate("abc").unwrap_err();
        assert!(err.message.contains("between 6 and 128"));
        let err = v.validate("NOSPECIAL1").unwrap_err();
        assert_eq!(err.message, WEAK_PASSWORD_MESSAGE);
    }
}
