//! Store implementations for the Jobs domain

pub mod memory;
pub mod postgres;

use khademni_common::Result;

use crate::domain::entities::{Application, Job, JobStatus, NewApplication, NewJob};

pub use memory::MemoryJobStore;
pub use postgres::PgJobStore;

/// Result of an application insert, decided atomically by the store
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Created(Application),
    JobMissing,
    JobClosed,
    Duplicate,
}

/// Persistence for jobs and their applications
#[async_trait::async_trait]
pub trait JobStore: Send + Sync {
    async fn create_job(&self, job: NewJob) -> Result<Job>;

    async fn find_job(&self, id: i64) -> Result<Option<Job>>;

    /// Newest first
    async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>>;

    /// Newest first, any status
    async fn list_jobs_by_employer(&self, employer_id: i64) -> Result<Vec<Job>>;

    /// Compare-and-set the job status. `None` when the job is gone or its
    /// status no longer equals `from`.
    async fn update_job_status(&self, id: i64, from: JobStatus, to: JobStatus)
        -> Result<Option<Job>>;

    /// Delete the job and all of its applications as one unit of work.
    /// Returns `false` when the job does not exist.
    async fn delete_job_cascade(&self, id: i64) -> Result<bool>;

    /// Insert an application while the job is open and the (job, worker)
    /// pair is unused. Checks the job status before the duplicate.
    async fn insert_application(&self, application: NewApplication) -> Result<ApplyOutcome>;

    /// Oldest first
    async fn list_applications_for_job(&self, job_id: i64) -> Result<Vec<Application>>;
}
