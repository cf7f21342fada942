//! Store implementations for the accounts domain

pub mod memory;
pub mod postgres;

use khademni_common::{RepositoryError, Result};

use crate::domain::entities::{NewUser, User};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Persistence for user accounts
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with `AlreadyExists` when the username is taken.
    async fn create(&self, user: NewUser) -> std::result::Result<User, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}
