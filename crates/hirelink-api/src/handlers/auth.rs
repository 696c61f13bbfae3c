//! Auth API handlers: signup, signin, me, logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use hirelink_auth::{hash_password, issue_token, verify_password};
use hirelink_db::{DbError, NewUser, UserRepo};
use hirelink_models::{Role, User};

use crate::auth::{AuthUser, TOKEN_COOKIE};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Signup request body. `confirm_password` must equal `password`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: Role,
    // bcrypt truncates beyond 72 bytes, so cap there.
    #[validate(length(min = 8, max = 72))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub confirm_password: String,
}

/// Signin request body.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// User payload returned by auth endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Build the session cookie: httpOnly, 2-day max age (matches the
/// token TTL).
fn session_cookie(token: String, ttl_secs: i64) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_secs))
        .build()
}

/// Create an account and start a session.
///
/// The user row and its role profile are created in one transaction;
/// a duplicate email surfaces as 409 before any token is issued.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<UserResponse>)> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let password_hash = hash_password(&req.password, &state.auth)?;

    let user = UserRepo::create_with_profile(
        &state.pool,
        NewUser {
            name: &req.name,
            email: &req.email,
            password_hash: &password_hash,
            role: req.role,
        },
    )
    .await
    .map_err(|e| match e {
        DbError::UniqueViolation => ApiError::conflict("an account with this email already exists"),
        other => other.into(),
    })?;

    info!(user_id = %user.id, role = %user.role, "User signed up");

    let token = issue_token(user.id, req.role, &state.auth)?;
    let jar = jar.add(session_cookie(token, state.auth.token_ttl_secs));

    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(&user))))
}

/// Verify credentials and start a session.
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SigninRequest>,
) -> ApiResult<(CookieJar, Json<UserResponse>)> {
    let user = UserRepo::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("invalid email or password"))?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::unauthenticated("invalid email or password"));
    }

    let role: Role = user
        .role
        .parse()
        .map_err(|_| ApiError::internal("stored role is invalid"))?;

    let token = issue_token(user.id, role, &state.auth)?;
    let jar = jar.add(session_cookie(token, state.auth.token_ttl_secs));

    Ok((jar, Json(UserResponse::from(&user))))
}

/// Return the authenticated user's identity record.
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("account no longer exists"))?;

    Ok(Json(UserResponse::from(&user)))
}

/// End the session by clearing the cookie. Tokens are stateless, so
/// there is nothing to revoke server-side.
pub async fn logout(
    _user: AuthUser,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    let jar = jar.remove(Cookie::build(TOKEN_COOKIE).path("/").build());
    (jar, Json(serde_json::json!({ "message": "logged out" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupRequest {
        SignupRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Applicant,
            password: "correct-horse".to_string(),
            confirm_password: "correct-horse".to_string(),
        }
    }

    #[test]
    fn signup_accepts_matching_passwords() {
        assert!(valid_signup().validate().is_ok());
    }

    #[test]
    fn signup_rejects_mismatched_passwords() {
        let req = SignupRequest {
            confirm_password: "different".to_string(),
            ..valid_signup()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn signup_rejects_bad_email() {
        let req = SignupRequest {
            email: "not-an-email".to_string(),
            ..valid_signup()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn signup_rejects_short_password() {
        let req = SignupRequest {
            password: "short".to_string(),
            confirm_password: "short".to_string(),
            ..valid_signup()
        };
        assert!(req.validate().is_err());
    }
}
