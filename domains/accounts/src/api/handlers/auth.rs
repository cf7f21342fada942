//! Signup and login handlers
//!
//! - POST /api/auth/signup - Create an account and return a token
//! - POST /api/auth/login - Exchange credentials for a token

use std::sync::Arc;

use axum::{extract::State, Json};
use khademni_auth::{AuthError, CredentialChecker, Role};
use khademni_common::{Error, RepositoryError, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::NewUser;

/// Request for creating an account
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub role: Role,
}

/// Request for logging in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Token returned by signup and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub role: Role,
}

/// Argon2 is CPU-bound; keep it off the async worker threads.
async fn hash_password_blocking(
    credentials: Arc<dyn CredentialChecker>,
    password: String,
) -> Result<String> {
    let hashed = tokio::task::spawn_blocking(move || credentials.hash_password(&password))
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {}", e)))?;
    Ok(hashed?)
}

async fn verify_password_blocking(
    credentials: Arc<dyn CredentialChecker>,
    password: String,
    stored_hash: Option<String>,
) -> Result<bool> {
    let verified = tokio::task::spawn_blocking(move || {
        let hash = stored_hash.as_deref().unwrap_or(credentials.decoy_hash());
        credentials.verify_password(&password, hash)
    })
    .await
    .map_err(|e| Error::Internal(format!("Password verification task failed: {}", e)))?;
    Ok(verified?)
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<Json<AuthResponse>> {
    let password_hash = hash_password_blocking(state.credentials.clone(), req.password).await?;
    let new_user = NewUser::new(&req.username, req.email, password_hash, req.role)?;

    let user = state.users.create(new_user).await.map_err(|e| match e {
        RepositoryError::AlreadyExists => Error::Conflict("Username already taken".to_string()),
        other => other.into(),
    })?;

    let token = state.auth.issue_token(&user.username, user.role, user.id)?;

    tracing::info!(user_id = user.id, role = %user.role, "Account created");

    Ok(Json(AuthResponse {
        token,
        role: user.role,
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = state.users.find_by_username(req.username.trim()).await?;

    // Unknown users are verified against a decoy so both failures take as long
    let verified = verify_password_blocking(
        state.credentials.clone(),
        req.password,
        user.as_ref().map(|u| u.password_hash.clone()),
    )
    .await?;

    let user = match user {
        Some(user) if verified => user,
        Some(user) => {
            tracing::info!(user_id = user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        None => {
            tracing::info!("Login failed: unknown username");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let token = state.auth.issue_token(&user.username, user.role, user.id)?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        token,
        role: user.role,
    }))
}
