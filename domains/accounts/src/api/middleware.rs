//! Accounts domain state and auth backend integration

use crate::repository::UserStore;
use axum::extract::FromRef;
use khademni_auth::{AuthBackend, CredentialChecker};
use std::sync::Arc;

/// Application state for the Accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub users: Arc<dyn UserStore>,
    pub auth: AuthBackend,
    pub credentials: Arc<dyn CredentialChecker>,
}

impl FromRef<AccountsState> for AuthBackend {
    fn from_ref(state: &AccountsState) -> Self {
        state.auth.clone()
    }
}
