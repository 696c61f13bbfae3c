//! Application API handlers: apply, status updates, resume redirect.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use hirelink_models::{Application, ApplicationStatus, Role};

use hirelink_db::{ApplicantRepo, ApplicationRepo, DbError, JobRepo, RecruiterRepo};

use crate::auth::{ApplicantUser, AuthUser, RecruiterUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Apply to a job. The insert is the concurrency control: the unique
/// key on (applicant, job) guarantees at most one application per pair
/// no matter how many requests race.
pub async fn apply(
    State(state): State<AppState>,
    ApplicantUser(user): ApplicantUser,
    Path(job_id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Application>)> {
    let job = JobRepo::get(&state.pool, job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("job not found"))?;

    if job.application_deadline <= Utc::now() {
        return Err(ApiError::validation("application deadline has passed"));
    }

    let profile = ApplicantRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("applicant profile not found"))?;

    let application = ApplicationRepo::create(&state.pool, profile.id, job_id)
        .await
        .map_err(|e| match e {
            DbError::UniqueViolation => ApiError::conflict("already applied to this job"),
            other => other.into(),
        })?;

    info!(
        application_id = %application.id,
        job_id = %job_id,
        "Application submitted"
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// List the caller's own applications, newest first.
pub async fn my_applications(
    State(state): State<AppState>,
    ApplicantUser(user): ApplicantUser,
) -> ApiResult<Json<Vec<Application>>> {
    let profile = ApplicantRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("applicant profile not found"))?;

    let applications = ApplicationRepo::list_for_applicant(&state.pool, profile.id).await?;
    Ok(Json(applications))
}

/// Fetch one application. Readable by the recruiter who owns the
/// parent job and by the applicant who authored it, nobody else.
pub async fn get_application(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<Uuid>,
) -> ApiResult<Json<Application>> {
    let application = load_for_reader(&state, user, application_id).await?;
    Ok(Json(application))
}

/// Redirect to the applicant's stored resume.
pub async fn application_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<Uuid>,
) -> ApiResult<Redirect> {
    let application = load_for_reader(&state, user, application_id).await?;

    let profile = ApplicantRepo::find_by_id(&state.pool, application.applicant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("applicant profile not found"))?;

    let resume_url = profile
        .resume_url
        .ok_or_else(|| ApiError::not_found("no resume on file"))?;

    Ok(Redirect::temporary(&resume_url))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// Move an application through the lifecycle. Owning recruiter only;
/// transitions outside the forward-only state machine are rejected
/// before any write.
pub async fn set_application_status(
    State(state): State<AppState>,
    RecruiterUser(user): RecruiterUser,
    Path(application_id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> ApiResult<Json<Application>> {
    let next: ApplicationStatus = req
        .status
        .parse()
        .map_err(|_| ApiError::validation(format!("unknown status '{}'", req.status)))?;

    let application = ApplicationRepo::get(&state.pool, application_id)
        .await?
        .ok_or_else(|| ApiError::not_found("application not found"))?;

    let job = JobRepo::get(&state.pool, application.job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("job not found"))?;

    let recruiter = RecruiterRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("recruiter profile not found"))?;
    if job.recruiter_id != recruiter.id {
        return Err(ApiError::forbidden("you do not own this job"));
    }

    let current: ApplicationStatus = application
        .status
        .parse()
        .map_err(|_| ApiError::internal("stored status is invalid"))?;

    if !current.can_transition_to(next) {
        return Err(ApiError::validation(format!(
            "cannot move application from {current} to {next}"
        )));
    }

    let updated = ApplicationRepo::set_status(&state.pool, application_id, next.as_str()).await?;

    info!(
        application_id = %application_id,
        from = %current,
        to = %next,
        "Application status changed"
    );

    Ok(Json(updated))
}

/// Shared read-side lookup: load the application and enforce the
/// owner-or-author rule.
async fn load_for_reader(
    state: &AppState,
    user: AuthUser,
    application_id: Uuid,
) -> ApiResult<Application> {
    let application = ApplicationRepo::get(&state.pool, application_id)
        .await?
        .ok_or_else(|| ApiError::not_found("application not found"))?;

    let job = JobRepo::get(&state.pool, application.job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("job not found"))?;

    match user.role {
        Role::Applicant => {
            let profile = ApplicantRepo::find_by_user_id(&state.pool, user.id)
                .await?
                .ok_or_else(|| ApiError::forbidden("not your application"))?;
            if application.applicant_id != profile.id {
                return Err(ApiError::forbidden("not your application"));
            }
        }
        Role::Recruiter => {
            let profile = RecruiterRepo::find_by_user_id(&state.pool, user.id)
                .await?
                .ok_or_else(|| ApiError::forbidden("not your job"))?;
            if job.recruiter_id != profile.id {
                return Err(ApiError::forbidden("not your job"));
            }
        }
    }

    Ok(application)
}
