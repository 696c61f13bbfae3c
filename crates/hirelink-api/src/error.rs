//! API error types.

use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use hirelink_auth::AuthError;
use hirelink_db::DbError;

pub type ApiResult<T> = Result<T, ApiError>;

static REDACT_INTERNAL: OnceLock<bool> = OnceLock::new();

/// Set once at startup from `ApiConfig::is_production`. When enabled,
/// `Internal` responses carry a generic message instead of the
/// underlying error text.
pub fn redact_internal_errors(enabled: bool) {
    let _ = REDACT_INTERNAL.set(enabled);
}

/// The full error taxonomy exposed over HTTP.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing/invalid/expired token. 401.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Valid identity, wrong role or not the owner. 403.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Malformed body or query against the expected schema. 400.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness violation: duplicate application, save, hide or
    /// email. 409.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Unexpected store or runtime failure. 500.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Internal detail is hidden when
    /// redaction is on; every other variant's message is part of the
    /// API surface.
    fn client_message(&self, redact_internal: bool) -> String {
        match self {
            ApiError::Internal(_) if redact_internal => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "unauthenticated",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::Validation(_) => "validation",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal",
        }
    }
}

/// Store failures become `Internal`; the message is kept for operator
/// diagnosis, not promised stable for clients. The conflict message
/// here is the generic fallback; handlers that know which uniqueness
/// rule fired construct their own.
impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::UniqueViolation => ApiError::Conflict("resource already exists".to_string()),
            DbError::Sqlx(e) => ApiError::Internal(e.to_string()),
        }
    }
}

/// Every token failure collapses to the same 401; clients cannot tell
/// a stale token from a forged one. Configuration errors are fatal at
/// startup and only reach this path if something went badly sideways.
impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                ApiError::Unauthenticated("invalid or expired token".to_string())
            }
            AuthError::MissingSecret | AuthError::Crypto(_) => ApiError::Internal(e.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let redact = *REDACT_INTERNAL.get().unwrap_or(&false);

        let body = ErrorResponse {
            message: self.client_message(redact),
            error: Some(self.kind().to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(
            ApiError::unauthenticated("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unique_violation_becomes_conflict() {
        let err: ApiError = DbError::UniqueViolation.into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn redaction_hides_internal_detail_only() {
        let internal = ApiError::internal("connection refused");
        assert_eq!(internal.client_message(true), "An internal error occurred");
        assert!(internal.client_message(false).contains("connection refused"));

        let conflict = ApiError::conflict("job already saved");
        assert_eq!(
            conflict.client_message(true),
            conflict.client_message(false)
        );
    }

    #[test]
    fn expired_and_invalid_tokens_are_indistinguishable() {
        let expired: ApiError = AuthError::TokenExpired.into();
        let invalid: ApiError = AuthError::TokenInvalid("bad".to_string()).into();
        assert_eq!(expired.to_string(), invalid.to_string());
        assert_eq!(expired.status_code(), StatusCode::UNAUTHORIZED);
    }
}
