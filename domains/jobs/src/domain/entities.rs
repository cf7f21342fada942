//! Job board entities
//!
//! Jobs are posted by employers; applications are submitted by workers.
//! Both reference users by ID only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use khademni_common::{Error, Result};

use crate::domain::state::{JobEvent, JobState, JobStateMachine};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Open,
    Closed,
}

impl JobStatus {
    /// Convert to state machine state
    pub fn to_state(&self) -> JobState {
        match self {
            JobStatus::Open => JobState::Open,
            JobStatus::Closed => JobState::Closed,
        }
    }

    /// Create from state machine state
    pub fn from_state(state: JobState) -> Self {
        match state {
            JobState::Open => JobStatus::Open,
            JobState::Closed => JobStatus::Closed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// Posted job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub employer_id: i64,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn is_open(&self) -> bool {
        self.status.to_state().accepts_applications()
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.employer_id == user_id
    }

    /// Close the job to new applications
    pub fn close(&mut self) -> Result<()> {
        let new_state = self.apply_transition(JobEvent::Close)?;
        self.status = JobStatus::from_state(new_state);
        self.updated_at = Utc::now();
        Ok(())
    }

    fn apply_transition(&self, event: JobEvent) -> Result<JobState> {
        JobStateMachine::transition(self.status.to_state(), event).map_err(|e| {
            tracing::debug!(job_id = self.id, error = %e, "Rejected job transition");
            Error::Conflict("Job is closed".to_string())
        })
    }
}

/// A job that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub employer_id: i64,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

impl NewJob {
    /// Create an open job with validation
    pub fn new(title: &str, description: &str, employer_id: i64) -> Result<Self> {
        let title = validate_text("Title", title, MAX_TITLE_LEN)?;
        let description = validate_text("Description", description, MAX_DESCRIPTION_LEN)?;

        Ok(Self {
            title,
            description,
            employer_id,
            status: JobStatus::Open,
            created_at: Utc::now(),
        })
    }

    /// Attach a store-assigned ID
    pub fn into_job(self, id: i64) -> Job {
        Job {
            id,
            title: self.title,
            description: self.description,
            employer_id: self.employer_id,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

fn validate_text(field: &str, value: &str, max_len: usize) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > max_len {
        return Err(Error::Validation(format!(
            "{} cannot exceed {} characters",
            field, max_len
        )));
    }
    Ok(value.to_string())
}

/// Worker application to a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub worker_id: i64,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// An application that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub job_id: i64,
    pub worker_id: i64,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl NewApplication {
    pub fn pending(job_id: i64, worker_id: i64) -> Self {
        Self {
            job_id,
            worker_id,
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn into_application(self, id: i64) -> Application {
        Application {
            id,
            job_id: self.job_id,
            worker_id: self.worker_id,
            status: self.status,
            created_at: self.created_at,
        }
    }
}
