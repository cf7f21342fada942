//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use std::env;
use std::str::FromStr;

/// Default access token lifetime (24 hours)
const DEFAULT_JWT_TTL_SECONDS: i64 = 86_400;

/// Backing store selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreProvider {
    Postgres,
    Memory,
}

impl FromStr for StoreProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(StoreProvider::Postgres),
            "memory" => Ok(StoreProvider::Memory),
            other => Err(anyhow::anyhow!(
                "Unknown store provider: {}. Supported providers: postgres, memory",
                other
            )),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    /// Which store implementation backs the domains
    pub store_provider: StoreProvider,
    /// Database connection URL (required for the postgres provider)
    pub database_url: Option<String>,

    /// Token signing configuration
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
    pub jwt_ttl_seconds: i64,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("store_provider", &self.store_provider)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("jwt_ttl_seconds", &self.jwt_ttl_seconds)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_provider = lookup("STORE_PROVIDER")
            .map(|p| p.parse())
            .transpose()?
            .unwrap_or(StoreProvider::Memory);

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if store_provider == StoreProvider::Postgres && database_url.is_none() {
            return Err(anyhow::anyhow!(
                "DATABASE_URL is required for the postgres store provider"
            ));
        }

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET is required"))?;

        let jwt_ttl_seconds = match lookup("JWT_TTL_SECONDS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or_else(|| anyhow::anyhow!("JWT_TTL_SECONDS must be a positive integer"))?,
            None => DEFAULT_JWT_TTL_SECONDS,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {:?}", raw))?,
            None => 3000,
        };

        Ok(Self {
            store_provider,
            database_url,
            jwt_secret,
            jwt_issuer: lookup("JWT_ISSUER"),
            jwt_audience: lookup("JWT_AUDIENCE"),
            jwt_ttl_seconds,
            rust_log: lookup("RUST_LOG")
                .unwrap_or_else(|| "khademni=debug,tower_http=info".to_string()),
            port,
        })
    }
}
