//! Route definitions for Jobs domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::jobs;
use super::middleware::JobsState;

/// Create all Jobs domain API routes
pub fn routes() -> Router<JobsState> {
    Router::new()
        .route("/api/jobs", get(jobs::list_open_jobs).post(jobs::create_job))
        .route("/api/jobs/my-jobs", get(jobs::list_my_jobs))
        .route("/api/jobs/{id}", get(jobs::get_job).delete(jobs::delete_job))
        .route("/api/jobs/{id}/close", post(jobs::close_job))
        .route("/api/jobs/{id}/apply", post(jobs::apply_for_job))
        .route("/api/jobs/{id}/applications", get(jobs::list_applications))
}
