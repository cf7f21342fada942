//! Access control for the Khademni API
//!
//! Turns a bearer token into an immutable [`Principal`] once per request and
//! provides the role guard used before any state mutation. The token
//! mechanics, the identity lookup and password checking sit behind traits so
//! the domains never depend on a concrete implementation.

mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod jwt;
mod password;
mod principal;
mod types;

pub use backend::{AuthBackend, Authenticator, IdentityDirectory};
pub use claims::Claims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use jwt::{extract_bearer_token, JwtAuthenticator};
pub use password::{Argon2CredentialChecker, CredentialChecker};
pub use principal::Principal;
pub use types::{AuthIdentity, Role};
