//! User identity and role profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity record. The `role` column decides which profile row
/// (applicant or recruiter) the user owns; the store does not enforce
/// that split, the application layer does.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// bcrypt hash; never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// "APPLICANT" or "RECRUITER".
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Applicant profile, zero-or-one per APPLICANT user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApplicantProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    /// External URL of the uploaded resume, if any.
    pub resume_url: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Recruiter profile, zero-or-one per RECRUITER user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecruiterProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub position: Option<String>,
    pub created_at: DateTime<Utc>,
}
