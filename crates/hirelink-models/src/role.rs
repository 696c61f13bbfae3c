//! User roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Account role, fixed at signup and immutable afterwards.
///
/// Every route that requires authentication requires exactly one role;
/// there is no "any of" gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Applicant,
    Recruiter,
}

impl Role {
    /// Get the string representation stored in the database and in
    /// token claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Applicant => "APPLICANT",
            Role::Recruiter => "RECRUITER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a stored or claimed role string is unknown.
#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPLICANT" => Ok(Role::Applicant),
            "RECRUITER" => Ok(Role::Recruiter),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        assert_eq!("APPLICANT".parse::<Role>().unwrap(), Role::Applicant);
        assert_eq!("RECRUITER".parse::<Role>().unwrap(), Role::Recruiter);
        assert_eq!(Role::Applicant.as_str(), "APPLICANT");
    }

    #[test]
    fn rejects_unknown_role() {
        assert!("ADMIN".parse::<Role>().is_err());
        assert!("applicant".parse::<Role>().is_err());
    }
}
