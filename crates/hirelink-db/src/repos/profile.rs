//! Applicant and recruiter profile repositories.

use sqlx::PgPool;
use uuid::Uuid;

use hirelink_models::{ApplicantProfile, RecruiterProfile};

use crate::error::DbResult;

const APPLICANT_COLUMNS: &str = "id, user_id, resume_url, skills, experience_years, created_at";
const RECRUITER_COLUMNS: &str = "id, user_id, position, created_at";

pub struct ApplicantRepo;

impl ApplicantRepo {
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: Uuid,
    ) -> DbResult<Option<ApplicantProfile>> {
        let profile = sqlx::query_as::<_, ApplicantProfile>(&format!(
            "SELECT {APPLICANT_COLUMNS} FROM applicants WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(profile)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> DbResult<Option<ApplicantProfile>> {
        let profile = sqlx::query_as::<_, ApplicantProfile>(&format!(
            "SELECT {APPLICANT_COLUMNS} FROM applicants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(profile)
    }
}

pub struct RecruiterRepo;

impl RecruiterRepo {
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: Uuid,
    ) -> DbResult<Option<RecruiterProfile>> {
        let profile = sqlx::query_as::<_, RecruiterProfile>(&format!(
            "SELECT {RECRUITER_COLUMNS} FROM recruiters WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(profile)
    }
}
