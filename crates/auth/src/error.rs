//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header required")]
    MissingAuthorization,

    #[error("Invalid authorization header format")]
    InvalidAuthorizationFormat,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to load user")]
    UserLoadError,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Failed to issue token")]
    TokenIssueFailed,

    #[error("Failed to process credentials")]
    CredentialHashFailed,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserLoadError
            | AuthError::TokenIssueFailed
            | AuthError::CredentialHashFailed => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthorization => "MISSING_AUTHORIZATION",
            AuthError::InvalidAuthorizationFormat => "INVALID_AUTHORIZATION",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UserLoadError => "USER_LOAD_ERROR",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::TokenIssueFailed => "TOKEN_ISSUE_ERROR",
            AuthError::CredentialHashFailed => "CREDENTIAL_ERROR",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for khademni_common::Error {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        if err.status_code() == StatusCode::UNAUTHORIZED {
            khademni_common::Error::Authentication(message)
        } else {
            khademni_common::Error::Internal(message)
        }
    }
}
