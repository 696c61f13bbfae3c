//! Applications and the status state machine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::job::ValueParseError;

/// Application review status.
///
/// Transitions move forward only: PENDING -> REVIEWED ->
/// {ACCEPTED, REJECTED}. WITHDRAWN is reachable from PENDING or
/// REVIEWED. ACCEPTED, REJECTED and WITHDRAWN are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewed => "REVIEWED",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Withdrawn => "WITHDRAWN",
        }
    }

    /// Check if no further transitions are allowed from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Accepted
                | ApplicationStatus::Rejected
                | ApplicationStatus::Withdrawn
        )
    }

    /// Check whether a transition to `next` is allowed.
    ///
    /// Self-transitions are rejected; retrying a status update is not a
    /// no-op, it is a client error.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::{Accepted, Pending, Rejected, Reviewed, Withdrawn};
        match (self, next) {
            (Pending, Reviewed) | (Pending, Withdrawn) => true,
            (Reviewed, Accepted) | (Reviewed, Rejected) | (Reviewed, Withdrawn) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "REVIEWED" => Ok(ApplicationStatus::Reviewed),
            "ACCEPTED" => Ok(ApplicationStatus::Accepted),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            "WITHDRAWN" => Ok(ApplicationStatus::Withdrawn),
            other => Err(ValueParseError(other.to_string())),
        }
    }
}

/// Join of one applicant and one job; unique per (applicant_id, job_id).
///
/// Created by the applicant in PENDING state; the status field is
/// mutated only by the recruiter owning the parent job.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Application {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub job_id: Uuid,
    /// "PENDING", "REVIEWED", "ACCEPTED", "REJECTED" or "WITHDRAWN".
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::ApplicationStatus::{Accepted, Pending, Rejected, Reviewed, Withdrawn};

    #[test]
    fn forward_transitions_allowed() {
        assert!(Pending.can_transition_to(Reviewed));
        assert!(Reviewed.can_transition_to(Accepted));
        assert!(Reviewed.can_transition_to(Rejected));
    }

    #[test]
    fn withdrawal_from_pending_or_reviewed_only() {
        assert!(Pending.can_transition_to(Withdrawn));
        assert!(Reviewed.can_transition_to(Withdrawn));
        assert!(!Accepted.can_transition_to(Withdrawn));
        assert!(!Rejected.can_transition_to(Withdrawn));
        assert!(!Withdrawn.can_transition_to(Withdrawn));
    }

    #[test]
    fn backward_and_skip_transitions_rejected() {
        assert!(!Reviewed.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Accepted));
        assert!(!Pending.can_transition_to(Rejected));
        assert!(!Accepted.can_transition_to(Reviewed));
    }

    #[test]
    fn terminal_states() {
        assert!(Accepted.is_terminal());
        assert!(Rejected.is_terminal());
        assert!(Withdrawn.is_terminal());
        assert!(!Pending.is_terminal());
        assert!(!Reviewed.is_terminal());
    }
}
