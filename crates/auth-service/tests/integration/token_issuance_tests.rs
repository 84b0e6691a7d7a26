//! Integration tests for `POST /auth/token`.
//!
//! Issuance accepts any non-blank username/password pair and returns
//! `{token, token_type, expires_in}`. Every rejection is 401 with an empty body.

use auth_service::auth::TokenVerifier;
use auth_service::crypto::SigningKey;
use auth_service::models::TokenResponse;
use auth_test_utils::{TestAuthServer, TokenAssertions};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;

async fn post_token(
    server: &TestAuthServer,
    body: serde_json::Value,
) -> Result<reqwest::Response, anyhow::Error> {
    Ok(server
        .client()
        .post(format!("{}/auth/token", server.url()))
        .json(&body)
        .send()
        .await?)
}

// ============================================================================
// Successful Issuance
// ============================================================================

#[tokio::test]
async fn test_issue_token_success() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_with_ttl(60_000).await?;

    let response = post_token(&server, json!({"username": "alice", "password": "pw"})).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: TokenResponse = response.json().await?;
    assert_eq!(body.token_type, "Bearer");
    assert_eq!(body.expires_in, 60_000);

    body.token
        .assert_valid_jwt()
        .assert_for_subject("alice")
        .assert_lifetime_ms(60_000)
        .assert_not_expired();

    Ok(())
}

#[tokio::test]
async fn test_issued_token_verifies_with_server_key() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server.issue_token("alice").await?;

    let verifier = TokenVerifier::new(Arc::new(SigningKey::new(server.signing_secret())));
    let principal = verifier.verify(&token)?;

    assert_eq!(principal.subject(), "alice");
    assert!(principal.roles().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_response_body_field_names() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = post_token(&server, json!({"username": "alice", "password": "pw"})).await?;
    let body: serde_json::Value = response.json().await?;

    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 86_400_000);
    Ok(())
}

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn test_empty_username_is_401_without_token() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = post_token(&server, json!({"username": "", "password": "x"})).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.text().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_blank_credentials_are_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    for body in [
        json!({"username": "   ", "password": "pw"}),
        json!({"username": "alice", "password": ""}),
        json!({"username": "alice", "password": "  "}),
        json!({"username": "alice"}),
        json!({"password": "pw"}),
        json!({}),
    ] {
        let response = post_token(&server, body.clone()).await?;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "body {body} should be rejected"
        );
        assert!(response.text().await?.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn test_unparseable_body_is_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/auth/token", server.url()))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.text().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_get_on_issuance_endpoint_is_405() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server.get("/auth/token", None).await?;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
