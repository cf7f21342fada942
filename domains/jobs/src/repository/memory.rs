//! In-memory job store
//!
//! Jobs and applications live behind one mutex, so the status check, the
//! duplicate check and the insert of an application form a single step,
//! as does a cascading delete.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use khademni_common::{RepositoryError, Result};

use super::{ApplyOutcome, JobStore};
use crate::domain::entities::{Application, Job, JobStatus, NewApplication, NewJob};

#[derive(Debug, Default)]
struct Board {
    next_job_id: i64,
    next_application_id: i64,
    jobs: HashMap<i64, Job>,
    applications: HashMap<i64, Application>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryJobStore {
    board: Arc<Mutex<Board>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, Board>, RepositoryError> {
        self.board
            .lock()
            .map_err(|e| RepositoryError::InvalidData(format!("job board lock poisoned: {e}")))
    }
}

fn newest_first(mut jobs: Vec<Job>) -> Vec<Job> {
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    jobs
}

#[async_trait::async_trait]
impl JobStore for MemoryJobStore {
    async fn create_job(&self, job: NewJob) -> Result<Job> {
        let mut board = self.lock()?;
        board.next_job_id += 1;
        let created = job.into_job(board.next_job_id);
        board.jobs.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_job(&self, id: i64) -> Result<Option<Job>> {
        Ok(self.lock()?.jobs.get(&id).cloned())
    }

    async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>> {
        let jobs = self
            .lock()?
            .jobs
            .values()
            .filter(|j| j.status == status)
            .cloned()
            .collect();
        Ok(newest_first(jobs))
    }

    async fn list_jobs_by_employer(&self, employer_id: i64) -> Result<Vec<Job>> {
        let jobs = self
            .lock()?
            .jobs
            .values()
            .filter(|j| j.employer_id == employer_id)
            .cloned()
            .collect();
        Ok(newest_first(jobs))
    }

    async fn update_job_status(
        &self,
        id: i64,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<Job>> {
        let mut board = self.lock()?;
        match board.jobs.get_mut(&id) {
            Some(job) if job.status == from => {
                job.status = to;
                job.updated_at = Utc::now();
                Ok(Some(job.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_job_cascade(&self, id: i64) -> Result<bool> {
        let mut board = self.lock()?;
        if board.jobs.remove(&id).is_none() {
            return Ok(false);
        }
        board.applications.retain(|_, a| a.job_id != id);
        Ok(true)
    }

    async fn insert_application(&self, application: NewApplication) -> Result<ApplyOutcome> {
        let mut board = self.lock()?;

        match board.jobs.get(&application.job_id) {
            None => return Ok(ApplyOutcome::JobMissing),
            Some(job) if !job.is_open() => return Ok(ApplyOutcome::JobClosed),
            Some(_) => {}
        }

        let duplicate = board
            .applications
            .values()
            .any(|a| a.job_id == application.job_id && a.worker_id == application.worker_id);
        if duplicate {
            return Ok(ApplyOutcome::Duplicate);
        }

        board.next_application_id += 1;
        let created = application.into_application(board.next_application_id);
        board.applications.insert(created.id, created.clone());
        Ok(ApplyOutcome::Created(created))
    }

    async fn list_applications_for_job(&self, job_id: i64) -> Result<Vec<Application>> {
        let mut applications: Vec<Application> = self
            .lock()?
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        applications.sort_by_key(|a| a.id);
        Ok(applications)
    }
}
