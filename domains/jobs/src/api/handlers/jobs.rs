//! Job board API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use khademni_auth::{AuthUser, Role};
use khademni_common::{Result, ValidatedJson, ValidatedJsonRejection};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::JobsState;
use crate::domain::entities::{Application, ApplicationStatus, Job, JobStatus};

/// Job response DTO
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub employer_id: i64,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(j: Job) -> Self {
        Self {
            id: j.id,
            title: j.title,
            description: j.description,
            employer_id: j.employer_id,
            status: j.status,
            created_at: j.created_at,
            updated_at: j.updated_at,
        }
    }
}

/// Application response DTO
#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: i64,
    pub job_id: i64,
    pub worker_id: i64,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(a: Application) -> Self {
        Self {
            id: a.id,
            job_id: a.job_id,
            worker_id: a.worker_id,
            status: a.status,
            created_at: a.created_at,
        }
    }
}

/// Request for posting a job
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,
}

fn job_list(jobs: Vec<Job>) -> Json<Vec<JobResponse>> {
    Json(jobs.into_iter().map(Into::into).collect())
}

/// GET /api/jobs
pub async fn list_open_jobs(State(state): State<JobsState>) -> Result<Json<Vec<JobResponse>>> {
    let jobs = state.jobs.list_open_jobs().await?;
    tracing::debug!(count = jobs.len(), "Listed open jobs");
    Ok(job_list(jobs))
}

/// GET /api/jobs/my-jobs
pub async fn list_my_jobs(
    AuthUser(principal): AuthUser,
    State(state): State<JobsState>,
) -> Result<Json<Vec<JobResponse>>> {
    let jobs = state.jobs.list_jobs_for_employer(&principal).await?;
    Ok(job_list(jobs))
}

/// POST /api/jobs
///
/// The body is extracted as a `Result` so the role check runs before any
/// input error is reported.
pub async fn create_job(
    AuthUser(principal): AuthUser,
    State(state): State<JobsState>,
    payload: std::result::Result<ValidatedJson<CreateJobRequest>, ValidatedJsonRejection>,
) -> Result<(StatusCode, Json<JobResponse>)> {
    principal.require_role(Role::Employer)?;
    let ValidatedJson(req) = payload?;

    let job = state
        .jobs
        .create_job(&principal, &req.title, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(job.into())))
}

/// GET /api/jobs/{id}
pub async fn get_job(
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<Json<JobResponse>> {
    let job = state.jobs.get_job(id).await?;
    Ok(Json(job.into()))
}

/// DELETE /api/jobs/{id}
pub async fn delete_job(
    AuthUser(principal): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.jobs.delete_job(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/jobs/{id}/close
pub async fn close_job(
    AuthUser(principal): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<Json<JobResponse>> {
    let job = state.jobs.close_job(&principal, id).await?;
    Ok(Json(job.into()))
}

/// POST /api/jobs/{id}/apply
pub async fn apply_for_job(
    AuthUser(principal): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<ApplicationResponse>)> {
    let application = state.jobs.apply_for_job(&principal, id).await?;
    Ok((StatusCode::CREATED, Json(application.into())))
}

/// GET /api/jobs/{id}/applications
pub async fn list_applications(
    AuthUser(principal): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ApplicationResponse>>> {
    let applications = state
        .jobs
        .get_applications_for_job(&principal, id)
        .await?;
    Ok(Json(applications.into_iter().map(Into::into).collect()))
}
