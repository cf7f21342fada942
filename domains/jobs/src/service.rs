//! Job lifecycle operations
//!
//! Every operation that acts on behalf of a user takes the resolved
//! [`Principal`] and checks its role before touching the store.

use std::sync::Arc;

use khademni_auth::{Principal, Role};
use khademni_common::{Error, Result};

use crate::domain::entities::{Application, Job, JobStatus, NewApplication, NewJob};
use crate::repository::{ApplyOutcome, JobStore};

#[derive(Clone)]
pub struct JobLifecycleManager {
    store: Arc<dyn JobStore>,
}

fn job_not_found() -> Error {
    Error::NotFound("Job not found".to_string())
}

fn job_closed() -> Error {
    Error::Conflict("Job is closed".to_string())
}

impl JobLifecycleManager {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// All open jobs, newest first. Public.
    pub async fn list_open_jobs(&self) -> Result<Vec<Job>> {
        self.store.list_jobs_by_status(JobStatus::Open).await
    }

    /// Every job posted by the calling employer, whatever its status.
    pub async fn list_jobs_for_employer(&self, principal: &Principal) -> Result<Vec<Job>> {
        principal.require_role(Role::Employer)?;
        self.store.list_jobs_by_employer(principal.id()).await
    }

    pub async fn create_job(
        &self,
        principal: &Principal,
        title: &str,
        description: &str,
    ) -> Result<Job> {
        principal.require_role(Role::Employer)?;

        let job = self
            .store
            .create_job(NewJob::new(title, description, principal.id())?)
            .await?;

        tracing::info!(job_id = job.id, employer_id = job.employer_id, "Job created");
        Ok(job)
    }

    /// Public lookup.
    pub async fn get_job(&self, id: i64) -> Result<Job> {
        self.store.find_job(id).await?.ok_or_else(job_not_found)
    }

    /// Load a job and confirm the principal is the employer who posted it.
    async fn owned_job(&self, principal: &Principal, job_id: i64, action: &str) -> Result<Job> {
        principal.require_role(Role::Employer)?;

        let job = self.get_job(job_id).await?;
        if !job.is_owned_by(principal.id()) {
            tracing::warn!(
                job_id,
                user_id = principal.id(),
                employer_id = job.employer_id,
                "Rejected {} by non-owner",
                action
            );
            return Err(Error::Authorization(format!(
                "You can only {} your own jobs",
                action
            )));
        }
        Ok(job)
    }

    /// Stop accepting applications. Closed is terminal.
    pub async fn close_job(&self, principal: &Principal, job_id: i64) -> Result<Job> {
        let mut job = self.owned_job(principal, job_id, "close").await?;

        let previous = job.status;
        job.close()?;

        let closed = self
            .store
            .update_job_status(job.id, previous, job.status)
            .await?;

        match closed {
            Some(job) => {
                tracing::info!(job_id = job.id, "Job closed");
                Ok(job)
            }
            // Changed underneath us: gone, or closed by a concurrent request
            None => match self.store.find_job(job_id).await? {
                None => Err(job_not_found()),
                Some(_) => Err(job_closed()),
            },
        }
    }

    /// Remove the job together with all of its applications.
    pub async fn delete_job(&self, principal: &Principal, job_id: i64) -> Result<()> {
        self.owned_job(principal, job_id, "delete").await?;

        if !self.store.delete_job_cascade(job_id).await? {
            return Err(job_not_found());
        }

        tracing::info!(job_id, employer_id = principal.id(), "Job deleted");
        Ok(())
    }

    pub async fn apply_for_job(&self, principal: &Principal, job_id: i64) -> Result<Application> {
        principal.require_role(Role::Worker)?;

        let outcome = self
            .store
            .insert_application(NewApplication::pending(job_id, principal.id()))
            .await?;

        match outcome {
            ApplyOutcome::Created(application) => {
                tracing::info!(
                    application_id = application.id,
                    job_id,
                    worker_id = principal.id(),
                    "Application submitted"
                );
                Ok(application)
            }
            ApplyOutcome::JobMissing => Err(job_not_found()),
            ApplyOutcome::JobClosed => Err(job_closed()),
            ApplyOutcome::Duplicate => Err(Error::Conflict(
                "You have already applied to this job".to_string(),
            )),
        }
    }

    pub async fn get_applications_for_job(
        &self,
        principal: &Principal,
        job_id: i64,
    ) -> Result<Vec<Application>> {
        let job = self
            .owned_job(principal, job_id, "view applications for")
            .await?;
        self.store.list_applications_for_job(job.id).await
    }
}
