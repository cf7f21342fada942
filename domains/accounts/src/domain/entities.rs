//! User entities for the accounts domain

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use khademni_auth::{AuthIdentity, Role};
use khademni_common::{Error, Result};
use regex::Regex;
use serde::Serialize;

/// Usernames: letters, digits, dot, dash and underscore
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,50}$").expect("valid username regex"));

/// Validate a username according to the signup rules
pub fn validate_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Stored user account
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn identity(&self) -> AuthIdentity {
        AuthIdentity {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// A user that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Create a new user with validation
    pub fn new(
        username: &str,
        email: Option<String>,
        password_hash: String,
        role: Role,
    ) -> Result<Self> {
        let username = username.trim();
        if !validate_username(username) {
            return Err(Error::Validation(
                "Username must be 3-50 characters of letters, digits, '.', '-' or '_'".to_string(),
            ));
        }

        if password_hash.is_empty() {
            return Err(Error::Validation(
                "Password credential cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            username: username.to_string(),
            email: email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            password_hash,
            role,
            created_at: Utc::now(),
        })
    }

    /// Attach a store-assigned ID
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            created_at: self.created_at,
        }
    }
}
