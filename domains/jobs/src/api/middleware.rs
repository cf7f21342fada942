//! Jobs domain state and auth backend integration

use axum::extract::FromRef;
use khademni_auth::AuthBackend;

use crate::service::JobLifecycleManager;

/// Application state for the Jobs domain
#[derive(Clone)]
pub struct JobsState {
    pub jobs: JobLifecycleManager,
    pub auth: AuthBackend,
}

impl FromRef<JobsState> for AuthBackend {
    fn from_ref(state: &JobsState) -> Self {
        state.auth.clone()
    }
}
