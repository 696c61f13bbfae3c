//! API routes.

use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::applications::{
    application_resume, apply, get_application, my_applications, set_application_status,
};
use crate::handlers::auth::{logout, me, signin, signup};
use crate::handlers::companies::{create_company, get_company, list_companies};
use crate::handlers::health::{health, ready};
use crate::handlers::jobs::{
    create_job, delete_job, get_job, job_applications, job_dashboard, list_jobs, replace_job,
    update_job,
};
use crate::handlers::saved::{
    hidden_jobs, hide_job, save_job, saved_jobs, unhide_job, unsave_job,
};
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/me", get(me))
        .route("/logout", post(logout));

    let job_routes = Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        // Static segments before the :job_id catch-all
        .route("/jobs/saved", get(saved_jobs))
        .route("/jobs/hidden", get(hidden_jobs))
        .route(
            "/jobs/:job_id",
            get(get_job)
                .put(replace_job)
                .patch(update_job)
                .delete(delete_job),
        )
        .route("/jobs/:job_id/apply", post(apply))
        .route("/jobs/:job_id/save", post(save_job))
        .route("/jobs/:job_id/unsave", delete(unsave_job))
        .route("/jobs/:job_id/hide", post(hide_job))
        .route("/jobs/:job_id/unhide", delete(unhide_job))
        .route("/jobs/:job_id/dashboard", get(job_dashboard))
        .route("/jobs/:job_id/applications", get(job_applications));

    let application_routes = Router::new()
        .route("/applications/me", get(my_applications))
        .route("/applications/:application_id", get(get_application))
        .route(
            "/applications/:application_id/status",
            patch(set_application_status),
        )
        .route(
            "/applications/:application_id/resume",
            get(application_resume),
        );

    let company_routes = Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route("/companies/:company_id", get(get_company));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    Router::new()
        .merge(auth_routes)
        .merge(job_routes)
        .merge(application_routes)
        .merge(company_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
