//! Postgres job store
//!
//! Expects the `jobs` and `applications` tables from `migrations/`.
//! `applications` carries `UNIQUE (job_id, worker_id)`.

use khademni_common::{RepositoryError, Result};
use sqlx::PgPool;

use super::{ApplyOutcome, JobStore};
use crate::domain::entities::{Application, Job, JobStatus, NewApplication, NewJob};

const JOB_COLUMNS: &str =
    "id, title, description, employer_id, status, created_at, updated_at";

const APPLICATION_COLUMNS: &str = "id, job_id, worker_id, status, created_at";

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl JobStore for PgJobStore {
    async fn create_job(&self, job: NewJob) -> Result<Job> {
        let query = format!(
            "INSERT INTO jobs (title, description, employer_id, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING {JOB_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Job>(&query)
            .bind(&job.title)
            .bind(&job.description)
            .bind(job.employer_id)
            .bind(job.status)
            .bind(job.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_constraint)?;
        Ok(row)
    }

    async fn find_job(&self, id: i64) -> Result<Option<Job>> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let row = sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>> {
        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE status = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, Job>(&query)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_jobs_by_employer(&self, employer_id: i64) -> Result<Vec<Job>> {
        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE employer_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, Job>(&query)
            .bind(employer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_job_status(
        &self,
        id: i64,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<Job>> {
        let query = format!(
            "UPDATE jobs SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {JOB_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_job_cascade(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes with insert_application (FOR SHARE)
        let locked: Option<i64> = sqlx::query_scalar("SELECT id FROM jobs WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(false);
        }

        let applications = sqlx::query("DELETE FROM applications WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            job_id = id,
            applications_deleted = applications.rows_affected(),
            "Deleted job with applications"
        );
        Ok(true)
    }

    async fn insert_application(&self, application: NewApplication) -> Result<ApplyOutcome> {
        let mut tx = self.pool.begin().await?;

        // Holds off close and delete until the insert commits
        let status: Option<JobStatus> =
            sqlx::query_scalar("SELECT status FROM jobs WHERE id = $1 FOR SHARE")
                .bind(application.job_id)
                .fetch_optional(&mut *tx)
                .await?;

        match status {
            None => return Ok(ApplyOutcome::JobMissing),
            Some(status) if !status.to_state().accepts_applications() => {
                return Ok(ApplyOutcome::JobClosed)
            }
            Some(_) => {}
        }

        let query = format!(
            "INSERT INTO applications (job_id, worker_id, status, created_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (job_id, worker_id) DO NOTHING \
             RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Application>(&query)
            .bind(application.job_id)
            .bind(application.worker_id)
            .bind(application.status)
            .bind(application.created_at)
            .fetch_optional(&mut *tx)
            .await
            .map_err(RepositoryError::from_constraint)?;

        tx.commit().await?;

        Ok(match row {
            Some(created) => ApplyOutcome::Created(created),
            None => ApplyOutcome::Duplicate,
        })
    }

    async fn list_applications_for_job(&self, job_id: i64) -> Result<Vec<Application>> {
        let query = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE job_id = $1 ORDER BY created_at ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, Application>(&query)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
