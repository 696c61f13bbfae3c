//! PostgreSQL access for the hirelink backend.
//!
//! One repo per entity, in the `repos` module. All cross-request
//! consistency (one application per applicant per job, one save, one
//! hide) rides on unique constraints in the schema; repos issue single
//! constrained writes and surface constraint violations as
//! [`DbError::UniqueViolation`], never check-then-insert.

pub mod error;
pub mod pool;
pub mod repos;

pub use error::{DbError, DbResult};
pub use pool::{create_pool, run_migrations};
pub use repos::application::ApplicationRepo;
pub use repos::company::CompanyRepo;
pub use repos::job::{JobRepo, NewJob};
pub use repos::profile::{ApplicantRepo, RecruiterRepo};
pub use repos::saved_job::{HiddenJobRepo, SavedJobRepo};
pub use repos::user::{NewUser, UserRepo};
