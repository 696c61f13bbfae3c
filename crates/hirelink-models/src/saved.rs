//! Saved and hidden job toggle records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bookmark record, unique per (applicant_id, job_id). Pure toggle, no
/// status.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedJob {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub job_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

/// Hide record, unique per (applicant_id, job_id). Hidden jobs are
/// excluded from the applicant's search results.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HiddenJob {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub job_id: Uuid,
    pub hidden_at: DateTime<Utc>,
}
