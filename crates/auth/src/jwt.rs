//! JWT issuance, validation and token extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::backend::Authenticator;
use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::principal::Principal;
use crate::types::Role;

/// HS256 token authenticator
#[derive(Debug, Clone)]
pub struct JwtAuthenticator {
    config: AuthConfig,
}

impl JwtAuthenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);

        if let Some(aud) = &self.config.audience {
            validation.set_audience(&[aud]);
        } else {
            validation.validate_aud = false;
        }

        if let Some(iss) = &self.config.issuer {
            validation.set_issuer(&[iss]);
        }

        validation
    }

    /// Decode and validate a token into its claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.config.jwt_secret.as_ref());

        let token_data =
            decode::<Claims>(token, &decoding_key, &self.validation()).map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                AuthError::InvalidToken
            })?;

        Ok(token_data.claims)
    }
}

impl Authenticator for JwtAuthenticator {
    fn issue_token(&self, username: &str, role: Role, id: i64) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            sub: username.to_string(),
            role,
            id,
            iat: now,
            exp: now + self.config.token_ttl_seconds.max(1) as u64,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let encoding_key = EncodingKey::from_secret(self.config.jwt_secret.as_ref());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
            tracing::error!(error = %e, user_id = id, "Failed to sign token");
            AuthError::TokenIssueFailed
        })
    }

    fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.decode_claims(token)?;
        Ok(Principal::new(claims.id, claims.sub, claims.role))
    }
}

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    match header_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}
