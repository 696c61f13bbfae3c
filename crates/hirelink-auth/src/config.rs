//! Auth configuration.

use crate::error::AuthError;

/// Default session token lifetime: 2 days.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 2 * 24 * 60 * 60;

/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Auth service configuration. Read-only after startup.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens.
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: i64,
    /// bcrypt work factor.
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create config from environment variables.
    ///
    /// Fails with `AuthError::MissingSecret` when `JWT_SECRET` is unset
    /// or empty; the server binary treats that as fatal at startup so a
    /// misconfigured deployment never serves a single request.
    pub fn from_env() -> Result<Self, AuthError> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingSecret)?;

        let token_ttl_secs = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_BCRYPT_COST);

        Ok(Self {
            jwt_secret,
            token_ttl_secs,
            bcrypt_cost,
        })
    }

    /// Config with a fixed secret, for tests.
    pub fn for_tests(secret: &str) -> Self {
        Self {
            jwt_secret: secret.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            bcrypt_cost: 4, // minimum cost, keeps the test suite fast
        }
    }
}
