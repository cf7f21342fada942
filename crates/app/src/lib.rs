//! Khademni application composition root
//!
//! Picks the store implementations from configuration and composes the
//! domain routers into a single application.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use khademni_accounts::{AccountsState, MemoryUserStore, PgUserStore, UserStore};
use khademni_auth::{
    Argon2CredentialChecker, AuthBackend, AuthConfig, IdentityDirectory, JwtAuthenticator,
};
use khademni_common::{Config, StoreProvider};
use khademni_jobs::{JobLifecycleManager, JobStore, JobsState, MemoryJobStore, PgJobStore};
use sqlx::PgPool;

/// Create the main application router for the configured store provider
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let auth_config = AuthConfig::from(config);

    let app = match config.store_provider {
        StoreProvider::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on shutdown");
            compose(
                Arc::new(MemoryUserStore::new()),
                Arc::new(MemoryJobStore::new()),
                auth_config,
            )
        }
        StoreProvider::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store provider")?;

            let pool = PgPool::connect(database_url)
                .await
                .context("Database connection failed")?;
            tracing::info!("Database connection established");

            sqlx::migrate!("../../migrations")
                .run(&pool)
                .await
                .context("Database migration failed")?;
            tracing::info!("Database migrations applied");

            compose(
                Arc::new(PgUserStore::new(pool.clone())),
                Arc::new(PgJobStore::new(pool)),
                auth_config,
            )
        }
    };

    Ok(app)
}

/// Compose the domain routers over the given stores.
///
/// The user store doubles as the identity directory behind token checks.
pub fn compose<U>(users: Arc<U>, jobs: Arc<dyn JobStore>, auth_config: AuthConfig) -> Router
where
    U: UserStore + IdentityDirectory + 'static,
{
    let auth = AuthBackend::new(
        Arc::new(JwtAuthenticator::new(auth_config)),
        users.clone() as Arc<dyn IdentityDirectory>,
    );

    let accounts_state = AccountsState {
        users: users as Arc<dyn UserStore>,
        auth: auth.clone(),
        credentials: Arc::new(Argon2CredentialChecker::new()),
    };

    let jobs_state = JobsState {
        jobs: JobLifecycleManager::new(jobs),
        auth,
    };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Khademni API v0.0.1-SNAPSHOT" }),
        )
        .merge(khademni_accounts::routes().with_state(accounts_state))
        .merge(khademni_jobs::routes().with_state(jobs_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
