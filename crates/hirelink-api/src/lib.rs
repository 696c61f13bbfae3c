//! Axum HTTP API server for the hirelink job board.
//!
//! This crate provides:
//! - Cookie-based session authentication with role gating
//! - Job search with typed filters and pagination
//! - Application lifecycle and saved/hidden job toggles

pub mod auth;
pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
