//! Job API handlers: search, CRUD, dashboard.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use hirelink_models::{
    validate_compensation, Application, CtcType, Job, JobType, PageMeta, Role, WorkMode,
};

use hirelink_db::{ApplicantRepo, ApplicationRepo, CompanyRepo, JobRepo, NewJob, RecruiterRepo};

use crate::auth::{OptionalAuthUser, RecruiterUser};
use crate::error::{ApiError, ApiResult};
use crate::filter::RawJobQuery;
use crate::state::AppState;

/// Paged job list response.
#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub pagination: PageMeta,
}

/// Create/replace request body for a job posting.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub company_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 120))]
    pub role: String,
    #[validate(length(min = 1, max = 120))]
    pub department: String,
    pub job_type: JobType,
    pub work_mode: WorkMode,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub skills: Vec<String>,
    pub min_experience: i32,
    pub max_experience: i32,
    pub ctc_type: CtcType,
    pub min_ctc: Option<i64>,
    pub max_ctc: Option<i64>,
    pub application_deadline: DateTime<Utc>,
}

/// Partial update body; absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    pub company_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub job_type: Option<JobType>,
    pub work_mode: Option<WorkMode>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub ctc_type: Option<CtcType>,
    // Doubly optional: absent keeps the stored bound, null clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub min_ctc: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_ctc: Option<Option<i64>>,
    pub application_deadline: Option<DateTime<Utc>>,
}

/// Distinguishes an absent field (outer `None`, handled by
/// `#[serde(default)]`) from an explicit `null` (inner `None`).
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Checks shared by create and update: experience band ordering,
/// compensation invariant, future deadline.
fn validate_job_fields(
    min_experience: i32,
    max_experience: i32,
    ctc_type: CtcType,
    min_ctc: Option<i64>,
    max_ctc: Option<i64>,
    application_deadline: DateTime<Utc>,
) -> ApiResult<()> {
    if min_experience < 0 || max_experience < min_experience {
        return Err(ApiError::validation(
            "minExperience must be non-negative and not exceed maxExperience",
        ));
    }
    validate_compensation(ctc_type, min_ctc, max_ctc)
        .map_err(|e| ApiError::validation(e.to_string()))?;
    if application_deadline <= Utc::now() {
        return Err(ApiError::validation(
            "applicationDeadline must be in the future",
        ));
    }
    Ok(())
}

/// Resolve the caller's recruiter profile.
async fn recruiter_profile_id(state: &AppState, user_id: Uuid) -> ApiResult<Uuid> {
    let profile = RecruiterRepo::find_by_user_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("recruiter profile not found"))?;
    Ok(profile.id)
}

/// Fetch a job and enforce the owner-only rule.
async fn owned_job(state: &AppState, job_id: Uuid, recruiter_id: Uuid) -> ApiResult<Job> {
    let job = JobRepo::get(&state.pool, job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("job not found"))?;
    if job.recruiter_id != recruiter_id {
        return Err(ApiError::forbidden("you do not own this job"));
    }
    Ok(job)
}

/// Search jobs with the typed filter.
///
/// Authenticated applicants do not see jobs they already applied to or
/// hid; everyone else sees the unfiltered set.
pub async fn list_jobs(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(raw): Query<RawJobQuery>,
) -> ApiResult<Json<JobListResponse>> {
    let filter = raw.into_filter()?;

    let applicant_id = match viewer.0 {
        Some(user) if user.role == Role::Applicant => {
            ApplicantRepo::find_by_user_id(&state.pool, user.id)
                .await?
                .map(|p| p.id)
        }
        _ => None,
    };

    let (jobs, total) = JobRepo::search(&state.pool, &filter, applicant_id).await?;

    Ok(Json(JobListResponse {
        jobs,
        pagination: PageMeta::new(total, filter.page),
    }))
}

/// Get a single job.
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<Job>> {
    let job = JobRepo::get(&state.pool, job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("job not found"))?;
    Ok(Json(job))
}

/// Post a new job.
pub async fn create_job(
    State(state): State<AppState>,
    RecruiterUser(user): RecruiterUser,
    Json(req): Json<JobRequest>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;
    validate_job_fields(
        req.min_experience,
        req.max_experience,
        req.ctc_type,
        req.min_ctc,
        req.max_ctc,
        req.application_deadline,
    )?;

    let recruiter_id = recruiter_profile_id(&state, user.id).await?;

    CompanyRepo::get(&state.pool, req.company_id)
        .await?
        .ok_or_else(|| ApiError::not_found("company not found"))?;

    let job = JobRepo::create(
        &state.pool,
        &NewJob {
            recruiter_id,
            company_id: req.company_id,
            title: req.title,
            description: req.description,
            role: req.role,
            department: req.department,
            job_type: req.job_type.as_str().to_string(),
            work_mode: req.work_mode.as_str().to_string(),
            location: req.location,
            skills: req.skills,
            min_experience: req.min_experience,
            max_experience: req.max_experience,
            ctc_type: req.ctc_type.as_str().to_string(),
            min_ctc: req.min_ctc,
            max_ctc: req.max_ctc,
            application_deadline: req.application_deadline,
        },
    )
    .await?;

    info!(job_id = %job.id, recruiter_id = %recruiter_id, "Job created");

    Ok((StatusCode::CREATED, Json(job)))
}

/// Replace a job (PUT). Owner-only.
pub async fn replace_job(
    State(state): State<AppState>,
    RecruiterUser(user): RecruiterUser,
    Path(job_id): Path<Uuid>,
    Json(req): Json<JobRequest>,
) -> ApiResult<Json<Job>> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;
    validate_job_fields(
        req.min_experience,
        req.max_experience,
        req.ctc_type,
        req.min_ctc,
        req.max_ctc,
        req.application_deadline,
    )?;

    let recruiter_id = recruiter_profile_id(&state, user.id).await?;
    owned_job(&state, job_id, recruiter_id).await?;

    CompanyRepo::get(&state.pool, req.company_id)
        .await?
        .ok_or_else(|| ApiError::not_found("company not found"))?;

    let job = JobRepo::update(
        &state.pool,
        job_id,
        &NewJob {
            recruiter_id,
            company_id: req.company_id,
            title: req.title,
            description: req.description,
            role: req.role,
            department: req.department,
            job_type: req.job_type.as_str().to_string(),
            work_mode: req.work_mode.as_str().to_string(),
            location: req.location,
            skills: req.skills,
            min_experience: req.min_experience,
            max_experience: req.max_experience,
            ctc_type: req.ctc_type.as_str().to_string(),
            min_ctc: req.min_ctc,
            max_ctc: req.max_ctc,
            application_deadline: req.application_deadline,
        },
    )
    .await?;

    Ok(Json(job))
}

/// Partially update a job (PATCH). Owner-only; the merged result must
/// satisfy the same invariants as a fresh posting.
pub async fn update_job(
    State(state): State<AppState>,
    RecruiterUser(user): RecruiterUser,
    Path(job_id): Path<Uuid>,
    Json(patch): Json<JobPatch>,
) -> ApiResult<Json<Job>> {
    let recruiter_id = recruiter_profile_id(&state, user.id).await?;
    let current = owned_job(&state, job_id, recruiter_id).await?;

    let job_type = match patch.job_type {
        Some(t) => t,
        None => current
            .job_type
            .parse()
            .map_err(|_| ApiError::internal("stored job_type is invalid"))?,
    };
    let work_mode = match patch.work_mode {
        Some(m) => m,
        None => current
            .work_mode
            .parse()
            .map_err(|_| ApiError::internal("stored work_mode is invalid"))?,
    };
    let ctc_type = match patch.ctc_type {
        Some(t) => t,
        None => current
            .ctc_type
            .parse()
            .map_err(|_| ApiError::internal("stored ctc_type is invalid"))?,
    };

    let merged = NewJob {
        recruiter_id,
        company_id: patch.company_id.unwrap_or(current.company_id),
        title: patch.title.unwrap_or(current.title),
        description: patch.description.unwrap_or(current.description),
        role: patch.role.unwrap_or(current.role),
        department: patch.department.unwrap_or(current.department),
        job_type: job_type.as_str().to_string(),
        work_mode: work_mode.as_str().to_string(),
        location: patch.location.unwrap_or(current.location),
        skills: patch.skills.unwrap_or(current.skills),
        min_experience: patch.min_experience.unwrap_or(current.min_experience),
        max_experience: patch.max_experience.unwrap_or(current.max_experience),
        ctc_type: ctc_type.as_str().to_string(),
        min_ctc: patch.min_ctc.unwrap_or(current.min_ctc),
        max_ctc: patch.max_ctc.unwrap_or(current.max_ctc),
        application_deadline: patch
            .application_deadline
            .unwrap_or(current.application_deadline),
    };

    validate_job_fields(
        merged.min_experience,
        merged.max_experience,
        ctc_type,
        merged.min_ctc,
        merged.max_ctc,
        merged.application_deadline,
    )?;

    if let Some(company_id) = patch.company_id {
        CompanyRepo::get(&state.pool, company_id)
            .await?
            .ok_or_else(|| ApiError::not_found("company not found"))?;
    }

    let job = JobRepo::update(&state.pool, job_id, &merged).await?;
    Ok(Json(job))
}

/// Delete a job. Owner-only.
pub async fn delete_job(
    State(state): State<AppState>,
    RecruiterUser(user): RecruiterUser,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let recruiter_id = recruiter_profile_id(&state, user.id).await?;
    owned_job(&state, job_id, recruiter_id).await?;

    JobRepo::delete(&state.pool, job_id).await?;
    info!(job_id = %job_id, "Job deleted");

    Ok(Json(serde_json::json!({ "message": "job deleted" })))
}

/// Application counts grouped by status for one job. Owner-only.
#[derive(Serialize)]
pub struct JobDashboardResponse {
    pub job: Job,
    pub total_applications: i64,
    /// Count per status; statuses with no applications are present
    /// with a zero count.
    pub status_counts: HashMap<String, i64>,
}

pub async fn job_dashboard(
    State(state): State<AppState>,
    RecruiterUser(user): RecruiterUser,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<JobDashboardResponse>> {
    let recruiter_id = recruiter_profile_id(&state, user.id).await?;
    let job = owned_job(&state, job_id, recruiter_id).await?;

    let mut status_counts: HashMap<String, i64> =
        ["PENDING", "REVIEWED", "ACCEPTED", "REJECTED", "WITHDRAWN"]
            .iter()
            .map(|s| (s.to_string(), 0))
            .collect();
    let mut total = 0;
    for (status, count) in ApplicationRepo::status_counts(&state.pool, job_id).await? {
        total += count;
        status_counts.insert(status, count);
    }

    Ok(Json(JobDashboardResponse {
        job,
        total_applications: total,
        status_counts,
    }))
}

/// List applications for one job. Owner-only.
pub async fn job_applications(
    State(state): State<AppState>,
    RecruiterUser(user): RecruiterUser,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Application>>> {
    let recruiter_id = recruiter_profile_id(&state, user.id).await?;
    owned_job(&state, job_id, recruiter_id).await?;

    let applications = ApplicationRepo::list_for_job(&state.pool, job_id).await?;
    Ok(Json(applications))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: JobPatch = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(patch.min_ctc, None);

        let patch: JobPatch = serde_json::from_str(r#"{"minCtc":null}"#).unwrap();
        assert_eq!(patch.min_ctc, Some(None));

        let patch: JobPatch = serde_json::from_str(r#"{"minCtc":500000}"#).unwrap();
        assert_eq!(patch.min_ctc, Some(Some(500000)));
    }

    #[test]
    fn rejects_inverted_experience_band() {
        let deadline = Utc::now() + Duration::days(30);
        let err =
            validate_job_fields(5, 2, CtcType::Undisclosed, None, None, deadline).unwrap_err();
        assert!(err.to_string().contains("maxExperience"));
    }

    #[test]
    fn rejects_past_deadline() {
        let deadline = Utc::now() - Duration::hours(1);
        assert!(validate_job_fields(0, 3, CtcType::Undisclosed, None, None, deadline).is_err());
    }

    #[test]
    fn rejects_range_without_bounds() {
        let deadline = Utc::now() + Duration::days(30);
        assert!(
            validate_job_fields(0, 3, CtcType::Range, Some(100), None, deadline).is_err()
        );
    }

    #[test]
    fn accepts_valid_fields() {
        let deadline = Utc::now() + Duration::days(30);
        assert!(
            validate_job_fields(0, 3, CtcType::Range, Some(100), Some(200), deadline).is_ok()
        );
    }
}
