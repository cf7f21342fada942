//! The acting principal of a request

use khademni_common::{Error, Result};

use crate::types::Role;

/// Authenticated identity derived from a verified token.
///
/// Built once per request by the `AuthUser` extractor and passed by
/// reference into domain operations; it is never re-parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: i64,
    username: String,
    role: Role,
}

impl Principal {
    pub fn new(id: i64, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Guard: fail with `Forbidden` unless the principal holds `role`.
    pub fn require_role(&self, role: Role) -> Result<()> {
        if self.role == role {
            Ok(())
        } else {
            tracing::warn!(
                user_id = self.id,
                actual = %self.role,
                required = %role,
                "Role check failed"
            );
            Err(Error::Authorization(format!(
                "Only {}s can perform this action",
                role
            )))
        }
    }
}
