//! Company records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company jobs are posted under. Created and managed by recruiters.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    /// Free-form classification used by the `companyType` search filter
    /// (e.g. "STARTUP", "MNC").
    pub company_type: String,
    pub website: Option<String>,
    /// Recruiter profile that created the company.
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}
