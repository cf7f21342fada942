//! Authentication configuration

/// Token signing and validation settings
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Lifetime of issued tokens in seconds
    pub token_ttl_seconds: i64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl From<&khademni_common::Config> for AuthConfig {
    fn from(config: &khademni_common::Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            token_ttl_seconds: config.jwt_ttl_seconds,
        }
    }
}
