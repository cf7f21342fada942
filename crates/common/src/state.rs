//! Common state machine error types
//!
//! Shared by the domain crates that implement entity lifecycles.

use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}
