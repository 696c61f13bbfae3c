//! Shared data models for the hirelink backend.
//!
//! This crate provides Serde-serializable types for:
//! - Users, applicant/recruiter profiles, and companies
//! - Jobs and their compensation model
//! - Applications and the status state machine
//! - Saved/hidden job records
//! - The typed job search filter and pagination metadata

pub mod application;
pub mod company;
pub mod filter;
pub mod job;
pub mod pagination;
pub mod role;
pub mod saved;
pub mod user;

// Re-export common types
pub use application::{Application, ApplicationStatus};
pub use company::Company;
pub use filter::{JobFilter, PageParams, SortOrder, DEFAULT_LIMIT, MAX_LIMIT};
pub use job::{
    validate_compensation, CompensationError, CtcType, Job, JobType, ValueParseError, WorkMode,
};
pub use pagination::PageMeta;
pub use role::{Role, RoleParseError};
pub use saved::{HiddenJob, SavedJob};
pub use user::{ApplicantProfile, RecruiterProfile, User};
