//! Jobs domain: job postings, applications, lifecycle

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{JobEvent, JobState, JobStateMachine, StateError};
// Re-export repository types
pub use repository::{ApplyOutcome, JobStore, MemoryJobStore, PgJobStore};
pub use service::JobLifecycleManager;

// Re-export API types
pub use api::routes;
pub use api::JobsState;
