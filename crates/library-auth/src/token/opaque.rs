//! Opaque refresh token values.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Generate a random string of ASCII letters and digits.
pub fn generate_opaque_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_alphabet() {
        let token = generate_opaque_token(64);
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_values_differ() {
        assert_ne!(generate_opaque_token(64), generate_opaque_token(64));
    }
}
