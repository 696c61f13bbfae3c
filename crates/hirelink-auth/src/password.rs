//! Password hashing and verification using bcrypt.

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Hash a plaintext password with bcrypt.
///
/// The salt is random, so two calls with the same input produce
/// different hashes.
pub fn hash_password(plain: &str, config: &AuthConfig) -> Result<String, AuthError> {
    bcrypt::hash(plain, config.bcrypt_cost).map_err(|e| AuthError::Crypto(e.to_string()))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is
/// malformed.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plain, hash).map_err(|e| AuthError::Crypto(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_matches() {
        let config = AuthConfig::for_tests("secret");
        let hash = hash_password("hunter2", &config).unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let config = AuthConfig::for_tests("secret");
        let hash = hash_password("hunter2", &config).unwrap();
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let config = AuthConfig::for_tests("secret");
        let a = hash_password("hunter2", &config).unwrap();
        let b = hash_password("hunter2", &config).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_returns_error() {
        assert!(verify_password("pw", "not-a-hash").is_err());
    }
}
