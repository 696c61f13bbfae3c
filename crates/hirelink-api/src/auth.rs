//! Session cookie authentication and role gating.
//!
//! Extractors are the middleware layer here: handlers declare the
//! identity they need (`AuthUser`, `ApplicantUser`, `RecruiterUser`)
//! and requests that cannot produce it are rejected before the handler
//! body runs. Routes require exactly one role, never "any of".

use std::net::IpAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;
use uuid::Uuid;

use hirelink_auth::verify_token;
use hirelink_models::Role;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "token";

/// Authenticated identity extracted from the session cookie.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

/// Pure gate: verify the cookie, attach identity, audit-log failures
/// with method, path and caller IP. No other side effects.
fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthUser, ApiError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let Some(cookie) = jar.get(TOKEN_COOKIE) else {
        audit_failure(parts, "missing token");
        return Err(ApiError::unauthenticated("authentication required"));
    };

    let claims = match verify_token(cookie.value(), &state.auth) {
        Ok(claims) => claims,
        Err(e) => {
            audit_failure(parts, &e.to_string());
            // Malformed and expired are not distinguished to the client.
            return Err(ApiError::unauthenticated("invalid or expired token"));
        }
    };

    let id = match claims.user_id() {
        Ok(id) => id,
        Err(_) => {
            // A signed token without a usable subject means something
            // is wrong on our side; log the distinct reason but answer
            // with the same 401 as any other bad token.
            audit_failure(parts, "invalid payload: subject is not a UUID");
            return Err(ApiError::unauthenticated("invalid or expired token"));
        }
    };

    Ok(AuthUser {
        id,
        role: claims.role,
    })
}

fn audit_failure(parts: &Parts, reason: &str) {
    warn!(
        method = %parts.method,
        path = %parts.uri.path(),
        ip = ?client_ip(parts),
        reason,
        "Authentication failed"
    );
}

/// Best-effort client IP: forwarded headers first, then the socket
/// address.
fn client_ip(parts: &Parts) -> Option<IpAddr> {
    if let Some(forwarded) = parts.headers.get("X-Forwarded-For") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                if let Ok(ip) = first.trim().parse() {
                    return Some(ip);
                }
            }
        }
    }

    if let Some(real_ip) = parts.headers.get("X-Real-IP") {
        if let Ok(value) = real_ip.to_str() {
            if let Ok(ip) = value.parse() {
                return Some(ip);
            }
        }
    }

    parts
        .extensions
        .get::<ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip())
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
    }
}

/// Identity when present, `None` otherwise. Used by `GET /jobs`, where
/// an authenticated applicant gets the visibility rule and everyone
/// else gets the unfiltered set. A present-but-invalid token is still
/// a 401, not anonymous access.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[axum::async_trait]
impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        if jar.get(TOKEN_COOKIE).is_none() {
            return Ok(OptionalAuthUser(None));
        }
        authenticate(parts, state).map(|user| OptionalAuthUser(Some(user)))
    }
}

/// Identity gated to the APPLICANT role.
#[derive(Debug, Clone, Copy)]
pub struct ApplicantUser(pub AuthUser);

#[axum::async_trait]
impl FromRequestParts<AppState> for ApplicantUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state)?;
        if user.role != Role::Applicant {
            return Err(ApiError::forbidden("applicant role required"));
        }
        Ok(ApplicantUser(user))
    }
}

/// Identity gated to the RECRUITER role.
#[derive(Debug, Clone, Copy)]
pub struct RecruiterUser(pub AuthUser);

#[axum::async_trait]
impl FromRequestParts<AppState> for RecruiterUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state)?;
        if user.role != Role::Recruiter {
            return Err(ApiError::forbidden("recruiter role required"));
        }
        Ok(RecruiterUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use hirelink_auth::{issue_token, AuthConfig};

    use crate::config::ApiConfig;

    const TEST_SECRET: &str = "test-secret";

    fn test_state() -> AppState {
        // Lazy pool: no connection happens unless a query runs, and the
        // extractors reject before any handler touches the database.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/hirelink")
            .unwrap();
        AppState {
            config: ApiConfig::default(),
            pool,
            auth: Arc::new(AuthConfig::for_tests(TEST_SECRET)),
        }
    }

    fn gated_router() -> Router {
        Router::new()
            .route(
                "/recruiter",
                get(|RecruiterUser(_): RecruiterUser| async { "ok" }),
            )
            .route(
                "/applicant",
                get(|ApplicantUser(_): ApplicantUser| async { "ok" }),
            )
            .route(
                "/open",
                get(|OptionalAuthUser(user): OptionalAuthUser| async move {
                    if user.is_some() {
                        "identified"
                    } else {
                        "anonymous"
                    }
                }),
            )
            .with_state(test_state())
    }

    fn token_for(role: Role) -> String {
        issue_token(Uuid::new_v4(), role, &AuthConfig::for_tests(TEST_SECRET)).unwrap()
    }

    async fn status_for(path: &str, token: Option<&str>) -> StatusCode {
        let mut request = Request::builder().uri(path);
        if let Some(token) = token {
            request = request.header(header::COOKIE, format!("{TOKEN_COOKIE}={token}"));
        }
        gated_router()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn recruiter_route_rejects_applicant_token() {
        let token = token_for(Role::Applicant);
        assert_eq!(
            status_for("/recruiter", Some(&token)).await,
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn applicant_route_rejects_recruiter_token() {
        let token = token_for(Role::Recruiter);
        assert_eq!(
            status_for("/applicant", Some(&token)).await,
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn matching_role_is_admitted() {
        let token = token_for(Role::Recruiter);
        assert_eq!(status_for("/recruiter", Some(&token)).await, StatusCode::OK);

        let token = token_for(Role::Applicant);
        assert_eq!(status_for("/applicant", Some(&token)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_cookie_is_unauthorized() {
        assert_eq!(
            status_for("/recruiter", None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        assert_eq!(
            status_for("/recruiter", Some("not-a-token")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn optional_auth_admits_anonymous_callers() {
        assert_eq!(status_for("/open", None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn optional_auth_still_rejects_invalid_tokens() {
        assert_eq!(
            status_for("/open", Some("not-a-token")).await,
            StatusCode::UNAUTHORIZED
        );
    }
}
