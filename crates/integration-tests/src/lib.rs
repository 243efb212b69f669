//! Integration tests for Haven.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p haven-cli -- migrate
//!
//! # Start the API
//! cargo run -p haven-api
//!
//! # Run the suite (ignored by default; needs the server above)
//! cargo test -p haven-integration-tests -- --ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("HAVEN_BASE_URL").unwrap_or_else(|_| "http://localhost:3333".to_owned())
}

/// Test context: an HTTP client pointed at a running server.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context from the environment.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .build()
                .expect("Failed to create HTTP client"),
            base_url: api_base_url(),
        }
    }

    /// Register a throwaway user, returning `(user, token)` from the response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not the expected shape.
    #[allow(clippy::expect_used)]
    pub async fn register_user(&self) -> (Value, String) {
        let email = format!("user-{}@example.com", Uuid::new_v4());
        let resp = self
            .client
            .post(format!("{}/api/v1/users", self.base_url))
            .json(&json!({
                "name": "Integration Tester",
                "email": email,
                "password": "15152020",
            }))
            .send()
            .await
            .expect("Failed to register user");

        assert!(resp.status().is_success());
        let body: Value = resp.json().await.expect("Failed to parse response");
        let token = body["token"].as_str().expect("token present").to_owned();
        (body["user"].clone(), token)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
