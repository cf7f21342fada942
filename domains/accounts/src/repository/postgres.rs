//! Postgres user store
//!
//! Expects the `users` table from `migrations/`, with a unique index on
//! `username`.

use khademni_auth::{AuthError, AuthIdentity, IdentityDirectory};
use khademni_common::{RepositoryError, Result};
use sqlx::PgPool;

use super::UserStore;
use crate::domain::entities::{NewUser, User};

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser) -> std::result::Result<User, RepositoryError> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_constraint)?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let row = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait::async_trait]
impl IdentityDirectory for PgUserStore {
    async fn find_identity(&self, id: i64) -> std::result::Result<Option<AuthIdentity>, AuthError> {
        let identity: Option<AuthIdentity> =
            sqlx::query_as("SELECT id, username, role FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, user_id = id, "Failed to load user");
                    AuthError::UserLoadError
                })?;

        Ok(identity)
    }
}
