//! State machines for Jobs domain entities
//!
//! A job is posted open and may be closed by its employer. Closed is
//! terminal: a closed job never reopens and accepts no applications.

pub use khademni_common::StateError;

// ============================================================================
// Job State Machine
// ============================================================================

/// Job lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    Open,
    Closed,
}

impl JobState {
    /// Whether workers may still apply
    pub fn accepts_applications(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Events that trigger job state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    /// Employer stops accepting applications
    Close,
}

/// Job state machine
pub struct JobStateMachine;

impl JobStateMachine {
    /// Attempt a state transition
    ///
    /// Returns the new state if the transition is valid, or an error otherwise.
    pub fn transition(current: JobState, event: JobEvent) -> Result<JobState, StateError> {
        match (current, event) {
            (JobState::Open, JobEvent::Close) => Ok(JobState::Closed),
            (JobState::Closed, _) => Err(StateError::TerminalState(current.to_string())),
        }
    }
}
