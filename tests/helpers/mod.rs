//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Duration;
use serde_json::{Value, json};
use tower::ServiceExt;

use chirpy_api::{AppState, build_app};
use chirpy_core::config::{AppConfig, HashingConfig, Platform};
use chirpy_core::traits::ManualClock;
use chirpy_database::Repositories;

/// Webhook key configured on every test app.
pub const POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Clock shared by every component of the app
    pub clock: Arc<ManualClock>,
}

/// Response captured from a test request
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Tokens handed out by a successful login.
pub struct Session {
    pub user_id: String,
    pub token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Create a new in-memory test application on the dev platform
    pub fn new() -> Self {
        Self::with_platform(Platform::Dev)
    }

    /// Create a new in-memory test application on the given platform
    pub fn with_platform(platform: Platform) -> Self {
        let mut config = AppConfig::default();
        config.server.platform = platform;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.auth.polka_key = POLKA_KEY.to_string();
        config.auth.hashing = HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        };

        let clock = Arc::new(ManualClock::starting_now());
        let state = AppState::new(config, Repositories::memory(), clock.clone())
            .expect("Failed to build app state");

        Self {
            router: build_app(state),
            clock,
        }
    }

    /// Move simulated time forward
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = authorization {
            builder = builder.header(header::AUTHORIZATION, auth);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    /// Register an account and return its ID
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/users",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"]
            .as_str()
            .expect("user id")
            .to_string()
    }

    /// Log in and return both tokens
    pub async fn login(&self, email: &str, password: &str) -> Session {
        let response = self
            .request(
                "POST",
                "/api/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        Session {
            user_id: response.body["id"].as_str().expect("id").to_string(),
            token: response.body["token"].as_str().expect("token").to_string(),
            refresh_token: response.body["refresh_token"]
                .as_str()
                .expect("refresh_token")
                .to_string(),
        }
    }
}

/// `Authorization` header value for a bearer credential
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// `Authorization` header value for an API key
pub fn api_key(key: &str) -> String {
    format!("ApiKey {key}")
}
