//! Job postings and the compensation model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a job enum string is unknown.
#[derive(Debug, Error)]
#[error("unknown value: {0}")]
pub struct ValueParseError(pub String);

/// Compensation model for a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CtcType {
    /// Explicit range; `min_ctc` and `max_ctc` are both required and
    /// `min_ctc <= max_ctc` must hold.
    Range,
    /// "Competitive": no figures published.
    Competitive,
    Undisclosed,
}

impl CtcType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CtcType::Range => "RANGE",
            CtcType::Competitive => "COMPETITIVE",
            CtcType::Undisclosed => "UNDISCLOSED",
        }
    }
}

impl fmt::Display for CtcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CtcType {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RANGE" => Ok(CtcType::Range),
            "COMPETITIVE" => Ok(CtcType::Competitive),
            "UNDISCLOSED" => Ok(CtcType::Undisclosed),
            other => Err(ValueParseError(other.to_string())),
        }
    }
}

/// Employment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Internship => "INTERNSHIP",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobType {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FULL_TIME" => Ok(JobType::FullTime),
            "PART_TIME" => Ok(JobType::PartTime),
            "CONTRACT" => Ok(JobType::Contract),
            "INTERNSHIP" => Ok(JobType::Internship),
            other => Err(ValueParseError(other.to_string())),
        }
    }
}

/// Work location mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkMode {
    Onsite,
    Remote,
    Hybrid,
}

impl WorkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkMode::Onsite => "ONSITE",
            WorkMode::Remote => "REMOTE",
            WorkMode::Hybrid => "HYBRID",
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkMode {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONSITE" => Ok(WorkMode::Onsite),
            "REMOTE" => Ok(WorkMode::Remote),
            "HYBRID" => Ok(WorkMode::Hybrid),
            other => Err(ValueParseError(other.to_string())),
        }
    }
}

/// A job posting. Owned by exactly one recruiter and attached to
/// exactly one company.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    /// Advertised role title used by the `roles` search filter
    /// (e.g. "Backend Engineer").
    pub role: String,
    pub department: String,
    /// "FULL_TIME", "PART_TIME", "CONTRACT" or "INTERNSHIP".
    pub job_type: String,
    /// "ONSITE", "REMOTE" or "HYBRID".
    pub work_mode: String,
    pub location: String,
    pub skills: Vec<String>,
    /// Experience band in years, inclusive on both ends.
    pub min_experience: i32,
    pub max_experience: i32,
    /// "RANGE", "COMPETITIVE" or "UNDISCLOSED".
    pub ctc_type: String,
    pub min_ctc: Option<i64>,
    pub max_ctc: Option<i64>,
    pub application_deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Compensation invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompensationError {
    #[error("RANGE compensation requires both min_ctc and max_ctc")]
    MissingBound,
    #[error("min_ctc must not exceed max_ctc")]
    InvertedRange,
}

/// Check the compensation invariant at write time.
///
/// The store does not enforce this; every create/update path must call
/// it before issuing the write. For non-RANGE types any bounds supplied
/// by the client are ignored rather than rejected.
pub fn validate_compensation(
    ctc_type: CtcType,
    min_ctc: Option<i64>,
    max_ctc: Option<i64>,
) -> Result<(), CompensationError> {
    if ctc_type != CtcType::Range {
        return Ok(());
    }
    match (min_ctc, max_ctc) {
        (Some(min), Some(max)) if min <= max => Ok(()),
        (Some(_), Some(_)) => Err(CompensationError::InvertedRange),
        _ => Err(CompensationError::MissingBound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_requires_ordered_bounds() {
        assert_eq!(
            validate_compensation(CtcType::Range, Some(100), Some(50)),
            Err(CompensationError::InvertedRange)
        );
        assert!(validate_compensation(CtcType::Range, Some(50), Some(100)).is_ok());
        assert!(validate_compensation(CtcType::Range, Some(70), Some(70)).is_ok());
    }

    #[test]
    fn range_requires_both_bounds() {
        assert_eq!(
            validate_compensation(CtcType::Range, Some(100), None),
            Err(CompensationError::MissingBound)
        );
        assert_eq!(
            validate_compensation(CtcType::Range, None, None),
            Err(CompensationError::MissingBound)
        );
    }

    #[test]
    fn non_range_ignores_bounds() {
        assert!(validate_compensation(CtcType::Competitive, Some(100), Some(50)).is_ok());
        assert!(validate_compensation(CtcType::Undisclosed, None, None).is_ok());
    }

    #[test]
    fn enums_parse_their_wire_names() {
        assert_eq!("FULL_TIME".parse::<JobType>().unwrap(), JobType::FullTime);
        assert_eq!("REMOTE".parse::<WorkMode>().unwrap(), WorkMode::Remote);
        assert_eq!("RANGE".parse::<CtcType>().unwrap(), CtcType::Range);
        assert!("CASUAL".parse::<JobType>().is_err());
    }
}
