//! Common test utilities and fixtures for integration tests
//!
//! - In-memory and Postgres application setup
//! - Request helpers
//! - Account fixtures (signup/login)
//! - Token forging for negative auth cases

use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use khademni_common::Config;

pub const TEST_JWT_SECRET: &str = "integration_test_secret_key";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

static INIT: Once = Once::new();
static NAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Database URL for Postgres-backed tests, if one is configured
pub fn test_database_url() -> Option<String> {
    INIT.call_once(|| {
        dotenvy::from_filename(".env.test").ok();
        dotenvy::dotenv().ok();
    });

    env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .ok()
        .filter(|url| !url.is_empty())
}

/// Username that does not collide with earlier runs against a shared database
pub fn unique_username(prefix: &str) -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default() % 1_000_000_000_000;
    format!(
        "{}_{}_{}",
        prefix,
        nanos,
        NAME_COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// Account created through the signup endpoint
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub token: String,
}

/// Composed application over fresh in-memory stores
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let config = Config::from_lookup(|key| match key {
            "STORE_PROVIDER" => Some("memory".to_string()),
            "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
            "JWT_TTL_SECONDS" => Some("600".to_string()),
            _ => None,
        })?;

        let router = khademni_app::create_app(&config).await?;
        Ok(Self { router })
    }

    /// Application over Postgres stores; `None` when no database is configured
    pub async fn postgres() -> Result<Option<Self>> {
        let Some(database_url) = test_database_url() else {
            eprintln!("Skipping Postgres test: TEST_DATABASE_URL / DATABASE_URL not set");
            return Ok(None);
        };

        let config = Config::from_lookup(|key| match key {
            "STORE_PROVIDER" => Some("postgres".to_string()),
            "DATABASE_URL" => Some(database_url.clone()),
            "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
            "JWT_TTL_SECONDS" => Some("600".to_string()),
            _ => None,
        })?;

        let router = khademni_app::create_app(&config).await?;
        Ok(Some(Self { router }))
    }

    /// Send a request and return the status with the parsed JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&b).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    /// Sign up a new account and return it with its token
    pub async fn signup(&self, username: &str, role: &str) -> TestUser {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({
                    "username": username,
                    "password": TEST_PASSWORD,
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");

        let token = body["token"].as_str().unwrap().to_string();
        let id = claims_of(&token)["id"].as_i64().unwrap();

        TestUser {
            id,
            username: username.to_string(),
            token,
        }
    }

    pub async fn employer(&self, username: &str) -> TestUser {
        self.signup(username, "employer").await
    }

    pub async fn worker(&self, username: &str) -> TestUser {
        self.signup(username, "worker").await
    }

    /// Post a job and return its ID
    pub async fn post_job(&self, employer: &TestUser, title: &str, description: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/jobs",
                Some(employer.token.as_str()),
                Some(json!({ "title": title, "description": description })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create job failed: {body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn apply(&self, worker: &TestUser, job_id: i64) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            &format!("/api/jobs/{job_id}/apply"),
            Some(worker.token.as_str()),
            None,
        )
        .await
    }

    pub async fn applications(&self, employer: &TestUser, job_id: i64) -> (StatusCode, Value) {
        self.send(
            Method::GET,
            &format!("/api/jobs/{job_id}/applications"),
            Some(employer.token.as_str()),
            None,
        )
        .await
    }
}

/// Decode token claims without verification (test inspection only)
pub fn claims_of(token: &str) -> Value {
    let mut validation = jsonwebtoken::Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    jsonwebtoken::decode::<Value>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(&[]),
        &validation,
    )
    .unwrap()
    .claims
}

/// Sign arbitrary claims with the given secret
pub fn forge_token(secret: &str, username: &str, role: &str, id: i64, ttl_seconds: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = json!({
        "sub": username,
        "role": role,
        "id": id,
        "iat": now,
        "exp": now + ttl_seconds,
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
