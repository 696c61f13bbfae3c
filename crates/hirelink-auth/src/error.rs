//! Auth error types.

use thiserror::Error;

/// Errors from credential and token operations.
///
/// `TokenExpired` and `TokenInvalid` are distinguished here for
/// logging; the API layer maps both to the same 401 so clients cannot
/// tell a stale token from a forged one.
#[derive(Debug, Error)]
pub enum AuthError {
    /// JWT_SECRET is unset. Fatal at startup, never a per-request error.
    #[error("JWT_SECRET is not set")]
    MissingSecret,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    /// bcrypt or JWT encoding failure.
    #[error("crypto error: {0}")]
    Crypto(String),
}
