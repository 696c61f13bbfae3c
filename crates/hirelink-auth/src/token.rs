//! Session token issuance and verification.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hirelink_models::Role;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID (UUID string).
    pub sub: String,
    /// Account role, "APPLICANT" or "RECRUITER".
    pub role: Role,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Parse the subject claim as a user ID.
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AuthError::TokenInvalid("subject is not a UUID".to_string()))
    }
}

/// Issue a signed HS256 session token for a user.
pub fn issue_token(user_id: Uuid, role: Role, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat: now,
        exp: now + config.token_ttl_secs,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify a session token (signature and expiry).
///
/// Stateless; no database lookup is performed.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["sub", "exp", "iat"]);

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let config = AuthConfig::for_tests("test-secret");
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, Role::Recruiter, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role, Role::Recruiter);
        assert_eq!(claims.exp - claims.iat, config.token_ttl_secs);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = AuthConfig::for_tests("test-secret");
        let other = AuthConfig::for_tests("other-secret");

        let token = issue_token(Uuid::new_v4(), Role::Applicant, &config).unwrap();
        assert!(matches!(
            verify_token(&token, &other),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut config = AuthConfig::for_tests("test-secret");
        // Issue a token that expired beyond the default leeway.
        config.token_ttl_secs = -120;

        let token = issue_token(Uuid::new_v4(), Role::Applicant, &config).unwrap();
        assert!(matches!(
            verify_token(&token, &config),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        let config = AuthConfig::for_tests("test-secret");
        assert!(matches!(
            verify_token("not-a-token", &config),
            Err(AuthError::TokenInvalid(_))
        ));
    }
}
