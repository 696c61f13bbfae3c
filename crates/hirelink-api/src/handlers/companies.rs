//! Company API handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use hirelink_models::Company;

use hirelink_db::{CompanyRepo, RecruiterRepo};

use crate::auth::RecruiterUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub company_type: String,
    #[validate(url)]
    pub website: Option<String>,
}

/// Register a company. Recruiter-only; the creating recruiter is
/// recorded on the row.
pub async fn create_company(
    State(state): State<AppState>,
    RecruiterUser(user): RecruiterUser,
    Json(req): Json<CompanyRequest>,
) -> ApiResult<(StatusCode, Json<Company>)> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let recruiter = RecruiterRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("recruiter profile not found"))?;

    let company = CompanyRepo::create(
        &state.pool,
        &req.name,
        &req.company_type,
        req.website.as_deref(),
        recruiter.id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

/// All companies, alphabetical.
pub async fn list_companies(State(state): State<AppState>) -> ApiResult<Json<Vec<Company>>> {
    let companies = CompanyRepo::list(&state.pool).await?;
    Ok(Json(companies))
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> ApiResult<Json<Company>> {
    let company = CompanyRepo::get(&state.pool, company_id)
        .await?
        .ok_or_else(|| ApiError::not_found("company not found"))?;
    Ok(Json(company))
}
