//! End-to-end tests for user registration and the authenticated profile.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p haven-api)
//!
//! Run with: cargo test -p haven-integration-tests -- --ignored

use serde_json::{Value, json};

use haven_integration_tests::TestContext;

#[tokio::test]
#[ignore = "requires a running server"]
async fn register_returns_user_and_token() {
    let ctx = TestContext::new();
    let (user, token) = ctx.register_user().await;

    assert!(user["id"].is_number());
    assert!(user["name"].is_string());
    assert!(user["email"].is_string());
    assert!(!token.is_empty());

    // The password hash must never be echoed.
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn register_with_missing_email_is_rejected() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(format!("{}/api/v1/users", ctx.base_url))
        .json(&json!({ "name": "No Email", "password": "15152020" }))
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn me_requires_authentication() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(format!("{}/api/v1/users", ctx.base_url))
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn me_returns_profile_with_orphanage_listing() {
    let ctx = TestContext::new();
    let (user, token) = ctx.register_user().await;

    let resp = ctx
        .client
        .get(format!("{}/api/v1/users", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("parse body");

    assert_eq!(body["id"], user["id"]);
    assert!(body["name"].is_string());
    assert!(body["email"].is_string());
    assert!(body["orphanages"].is_array());
}
