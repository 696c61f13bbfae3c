//! Saved-job and hidden-job toggle handlers.
//!
//! Each toggle maps straight onto one constrained write in the store:
//! the 409/404 outcomes come from the constraint, not from reading
//! first.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use hirelink_models::Job;

use hirelink_db::{ApplicantRepo, DbError, HiddenJobRepo, JobRepo, SavedJobRepo};

use crate::auth::ApplicantUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

async fn applicant_profile_id(state: &AppState, user_id: Uuid) -> ApiResult<Uuid> {
    let profile = ApplicantRepo::find_by_user_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("applicant profile not found"))?;
    Ok(profile.id)
}

/// Verify the job exists before touching a toggle, so a toggle on a
/// deleted job is a 404 rather than a foreign-key error.
async fn require_job(state: &AppState, job_id: Uuid) -> ApiResult<()> {
    JobRepo::get(&state.pool, job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("job not found"))?;
    Ok(())
}

/// Save a job for later. Saving twice is a 409.
pub async fn save_job(
    State(state): State<AppState>,
    ApplicantUser(user): ApplicantUser,
    Path(job_id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let applicant_id = applicant_profile_id(&state, user.id).await?;
    require_job(&state, job_id).await?;

    SavedJobRepo::save(&state.pool, applicant_id, job_id)
        .await
        .map_err(|e| match e {
            DbError::UniqueViolation => ApiError::conflict("job already saved"),
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "job saved" }))))
}

/// Remove a save. Unsaving a job that was never saved is a 404.
pub async fn unsave_job(
    State(state): State<AppState>,
    ApplicantUser(user): ApplicantUser,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let applicant_id = applicant_profile_id(&state, user.id).await?;

    if !SavedJobRepo::unsave(&state.pool, applicant_id, job_id).await? {
        return Err(ApiError::not_found("job was not saved"));
    }

    Ok(Json(json!({ "message": "job unsaved" })))
}

/// Jobs the caller has saved, most recent first.
pub async fn saved_jobs(
    State(state): State<AppState>,
    ApplicantUser(user): ApplicantUser,
) -> ApiResult<Json<Vec<Job>>> {
    let applicant_id = applicant_profile_id(&state, user.id).await?;
    let jobs = SavedJobRepo::list_jobs(&state.pool, applicant_id).await?;
    Ok(Json(jobs))
}

/// Hide a job from search results. Hiding twice is a 409.
pub async fn hide_job(
    State(state): State<AppState>,
    ApplicantUser(user): ApplicantUser,
    Path(job_id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let applicant_id = applicant_profile_id(&state, user.id).await?;
    require_job(&state, job_id).await?;

    HiddenJobRepo::hide(&state.pool, applicant_id, job_id)
        .await
        .map_err(|e| match e {
            DbError::UniqueViolation => ApiError::conflict("job already hidden"),
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "job hidden" }))))
}

/// Remove a hide. Unhiding a job that was never hidden is a 404.
pub async fn unhide_job(
    State(state): State<AppState>,
    ApplicantUser(user): ApplicantUser,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let applicant_id = applicant_profile_id(&state, user.id).await?;

    if !HiddenJobRepo::unhide(&state.pool, applicant_id, job_id).await? {
        return Err(ApiError::not_found("job was not hidden"));
    }

    Ok(Json(json!({ "message": "job unhidden" })))
}

/// Jobs the caller has hidden, most recent first.
pub async fn hidden_jobs(
    State(state): State<AppState>,
    ApplicantUser(user): ApplicantUser,
) -> ApiResult<Json<Vec<Job>>> {
    let applicant_id = applicant_profile_id(&state, user.id).await?;
    let jobs = HiddenJobRepo::list_jobs(&state.pool, applicant_id).await?;
    Ok(Json(jobs))
}
