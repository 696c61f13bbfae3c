//! Saved-job and hidden-job toggle repositories.
//!
//! Both are pure toggles backed by a unique key. Save/hide is a single
//! insert that fails on the constraint; unsave/unhide is a single
//! delete that reports whether anything was removed. No
//! check-then-act.

use sqlx::PgPool;
use uuid::Uuid;

use hirelink_models::{HiddenJob, Job, SavedJob};

use crate::error::DbResult;

const SAVED_COLUMNS: &str = "id, applicant_id, job_id, saved_at";
const HIDDEN_COLUMNS: &str = "id, applicant_id, job_id, hidden_at";
const JOB_COLUMNS_J: &str = "j.id, j.recruiter_id, j.company_id, j.title, j.description, j.role, \
     j.department, j.job_type, j.work_mode, j.location, j.skills, j.min_experience, \
     j.max_experience, j.ctc_type, j.min_ctc, j.max_ctc, j.application_deadline, j.created_at";

pub struct SavedJobRepo;

impl SavedJobRepo {
    /// Save a job. Already saved surfaces as `DbError::UniqueViolation`.
    pub async fn save(pool: &PgPool, applicant_id: Uuid, job_id: Uuid) -> DbResult<SavedJob> {
        let saved = sqlx::query_as::<_, SavedJob>(&format!(
            "INSERT INTO saved_jobs (applicant_id, job_id) VALUES ($1, $2) \
             RETURNING {SAVED_COLUMNS}"
        ))
        .bind(applicant_id)
        .bind(job_id)
        .fetch_one(pool)
        .await?;
        Ok(saved)
    }

    /// Remove a save. Returns false when no record existed.
    pub async fn unsave(pool: &PgPool, applicant_id: Uuid, job_id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE applicant_id = $1 AND job_id = $2")
            .bind(applicant_id)
            .bind(job_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Jobs the applicant has saved, most recently saved first.
    pub async fn list_jobs(pool: &PgPool, applicant_id: Uuid) -> DbResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS_J} FROM saved_jobs s JOIN jobs j ON j.id = s.job_id \
             WHERE s.applicant_id = $1 ORDER BY s.saved_at DESC"
        ))
        .bind(applicant_id)
        .fetch_all(pool)
        .await?;
        Ok(jobs)
    }
}

pub struct HiddenJobRepo;

impl HiddenJobRepo {
    /// Hide a job from the applicant's search results.
    pub async fn hide(pool: &PgPool, applicant_id: Uuid, job_id: Uuid) -> DbResult<HiddenJob> {
        let hidden = sqlx::query_as::<_, HiddenJob>(&format!(
            "INSERT INTO hidden_jobs (applicant_id, job_id) VALUES ($1, $2) \
             RETURNING {HIDDEN_COLUMNS}"
        ))
        .bind(applicant_id)
        .bind(job_id)
        .fetch_one(pool)
        .await?;
        Ok(hidden)
    }

    /// Remove a hide. Returns false when no record existed.
    pub async fn unhide(pool: &PgPool, applicant_id: Uuid, job_id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM hidden_jobs WHERE applicant_id = $1 AND job_id = $2")
            .bind(applicant_id)
            .bind(job_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Jobs the applicant has hidden, most recently hidden first.
    pub async fn list_jobs(pool: &PgPool, applicant_id: Uuid) -> DbResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS_J} FROM hidden_jobs h JOIN jobs j ON j.id = h.job_id \
             WHERE h.applicant_id = $1 ORDER BY h.hidden_at DESC"
        ))
        .bind(applicant_id)
        .fetch_all(pool)
        .await?;
        Ok(jobs)
    }
}
