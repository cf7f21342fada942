//! In-memory user store
//!
//! Backs local runs and tests. Thread-safe via `Arc<Mutex<>>`; the username
//! uniqueness check and the insert happen under one guard.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use khademni_auth::{AuthError, AuthIdentity, IdentityDirectory};
use khademni_common::{Error, RepositoryError, Result};

use super::UserStore;
use crate::domain::entities::{NewUser, User};

#[derive(Debug, Default)]
struct Users {
    next_id: i64,
    by_id: HashMap<i64, User>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Users>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, Users>, RepositoryError> {
        self.users
            .lock()
            .map_err(|e| RepositoryError::InvalidData(format!("users lock poisoned: {e}")))
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> std::result::Result<User, RepositoryError> {
        let mut users = self.lock()?;

        if users.by_id.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::AlreadyExists);
        }

        users.next_id += 1;
        let created = user.into_user(users.next_id);
        users.by_id.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.lock()?.by_id.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .lock()?
            .by_id
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait::async_trait]
impl IdentityDirectory for MemoryUserStore {
    async fn find_identity(&self, id: i64) -> std::result::Result<Option<AuthIdentity>, AuthError> {
        self.find_by_id(id)
            .await
            .map(|user| user.map(|u| u.identity()))
            .map_err(|e: Error| {
                tracing::error!(error = %e, user_id = id, "Failed to load user");
                AuthError::UserLoadError
            })
    }
}
