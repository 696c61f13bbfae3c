//! Application repository.

use sqlx::PgPool;
use uuid::Uuid;

use hirelink_models::Application;

use crate::error::DbResult;

const APPLICATION_COLUMNS: &str = "id, applicant_id, job_id, status, applied_at, updated_at";

pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Create an application in PENDING state.
    ///
    /// A single insert-or-fail on the (applicant_id, job_id) unique
    /// key; two concurrent applies for the same pair leave exactly one
    /// row and the loser gets `DbError::UniqueViolation`.
    pub async fn create(pool: &PgPool, applicant_id: Uuid, job_id: Uuid) -> DbResult<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (applicant_id, job_id) VALUES ($1, $2) \
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(applicant_id)
        .bind(job_id)
        .fetch_one(pool)
        .await?;
        Ok(application)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> DbResult<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(application)
    }

    /// Overwrite the status. Ownership and transition legality are
    /// checked by the caller before any write happens.
    pub async fn set_status(pool: &PgPool, id: Uuid, status: &str) -> DbResult<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications SET status = $2, updated_at = now() WHERE id = $1 \
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await?;
        Ok(application)
    }

    pub async fn list_for_job(pool: &PgPool, job_id: Uuid) -> DbResult<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE job_id = $1 \
             ORDER BY applied_at DESC"
        ))
        .bind(job_id)
        .fetch_all(pool)
        .await?;
        Ok(applications)
    }

    pub async fn list_for_applicant(
        pool: &PgPool,
        applicant_id: Uuid,
    ) -> DbResult<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE applicant_id = $1 \
             ORDER BY applied_at DESC"
        ))
        .bind(applicant_id)
        .fetch_all(pool)
        .await?;
        Ok(applications)
    }

    /// Grouped application counts per status for a job's dashboard.
    pub async fn status_counts(pool: &PgPool, job_id: Uuid) -> DbResult<Vec<(String, i64)>> {
        let counts = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM applications WHERE job_id = $1 GROUP BY status",
        )
        .bind(job_id)
        .fetch_all(pool)
        .await?;
        Ok(counts)
    }
}
