//! Auth read-model types
//!
//! Lightweight views of the user rows owned by the accounts domain.
//! These types carry only the fields needed for authentication and authorization.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Account role. Fixed at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employer,
    Worker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employer => "employer",
            Role::Worker => "worker",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employer" => Ok(Role::Employer),
            "worker" => Ok(Role::Worker),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Identity as seen by access control.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: i64,
    pub username: String,
    pub role: Role,
}
