//! Authentication backend
//!
//! Combines a token [`Authenticator`] with an [`IdentityDirectory`] so that a
//! verified token only yields a principal while the user still exists with
//! the role the token claims.
//!
//! Domain states expose this via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::error::AuthError;
use crate::principal::Principal;
use crate::types::{AuthIdentity, Role};

/// Token issuance and verification
pub trait Authenticator: Send + Sync {
    fn issue_token(&self, username: &str, role: Role, id: i64) -> Result<String, AuthError>;

    /// Verify signature and expiry. Claims are only trusted once this succeeds.
    fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Lookup of user identities by ID (read model over the accounts store)
#[async_trait::async_trait]
pub trait IdentityDirectory: Send + Sync {
    async fn find_identity(&self, id: i64) -> Result<Option<AuthIdentity>, AuthError>;
}

#[derive(Clone)]
pub struct AuthBackend {
    authenticator: Arc<dyn Authenticator>,
    identities: Arc<dyn IdentityDirectory>,
}

impl AuthBackend {
    pub fn new(authenticator: Arc<dyn Authenticator>, identities: Arc<dyn IdentityDirectory>) -> Self {
        Self {
            authenticator,
            identities,
        }
    }

    pub fn issue_token(&self, username: &str, role: Role, id: i64) -> Result<String, AuthError> {
        self.authenticator.issue_token(username, role, id)
    }

    /// Resolve the principal behind a bearer token.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let claimed = self.authenticator.verify(token)?;

        let identity = self
            .identities
            .find_identity(claimed.id())
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = claimed.id(), "Token subject no longer exists");
                AuthError::UserNotFound
            })?;

        if identity.role != claimed.role() || identity.username != claimed.username() {
            tracing::warn!(
                user_id = identity.id,
                "Token claims disagree with stored identity"
            );
            return Err(AuthError::InvalidToken);
        }

        Ok(Principal::new(identity.id, identity.username, identity.role))
    }
}
