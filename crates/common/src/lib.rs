//! Shared utilities, configuration, and error handling for Khademni
//!
//! This crate provides common functionality used across the Khademni backend:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP rendering
//! - Repository and state machine error types
//! - Request extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::{Config, StoreProvider};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{ValidatedJson, ValidatedJsonRejection};
pub use state::StateError;
