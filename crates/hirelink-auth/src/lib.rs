//! Credential and session token service.
//!
//! This crate provides:
//! - bcrypt password hashing and verification
//! - HS256 session token issuance and verification
//! - Auth configuration loaded from the environment
//!
//! Tokens are stateless; there is no server-side revocation list.
//! Logout is a client-side concern (the API clears the cookie).

pub mod config;
pub mod error;
pub mod password;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use token::{issue_token, verify_token, Claims};
