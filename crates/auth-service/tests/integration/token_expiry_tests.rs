//! Integration tests for token lifetime.
//!
//! Expiry is exclusive: a token is valid until `iat + ttl - 1ms` and expired
//! from `iat + ttl` onward.

use auth_service::auth::{TokenIssuer, TokenVerifier};
use auth_service::crypto::SigningKey;
use auth_service::errors::AuthError;
use auth_test_utils::{test_signing_secret, TestAuthServer, TestTokenBuilder};
use chrono::Utc;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_expiry_boundary_at_millisecond_precision() -> Result<(), anyhow::Error> {
    let key = Arc::new(SigningKey::new(&test_signing_secret(1)));
    let issuer = TokenIssuer::new(key.clone(), 1000);
    let verifier = TokenVerifier::new(key);

    let iat = 1_700_000_000_000;
    let issued = issuer.issue_at("alice", iat)?;

    assert_eq!(verifier.verify_at(&issued.token, iat)?.subject(), "alice");
    assert_eq!(
        verifier.verify_at(&issued.token, iat + 999)?.subject(),
        "alice"
    );
    assert_eq!(
        verifier.verify_at(&issued.token, iat + 1000),
        Err(AuthError::Expired)
    );
    Ok(())
}

#[tokio::test]
async fn test_alice_token_expires_after_ttl() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_with_ttl(1000).await?;
    let token = server.issue_token("alice").await?;
    let header = format!("Bearer {}", token);

    let verifier = TokenVerifier::new(Arc::new(SigningKey::new(server.signing_secret())));
    assert_eq!(verifier.verify(&token)?.subject(), "alice");

    let response = server.get("/api/v1/me", Some(&header)).await?;
    assert_eq!(response.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(verifier.verify(&token), Err(AuthError::Expired));
    let response = server.get("/api/v1/me", Some(&header)).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_expired_builder_token_is_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = TestTokenBuilder::new()
        .for_user("alice")
        .expired()
        .sign(server.signing_secret());

    let response = server
        .get("/api/v1/me", Some(&format!("Bearer {}", token)))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_token_without_issued_at_is_honored_until_expiry() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = TestTokenBuilder::new()
        .for_user("alice")
        .without_issued_at()
        .expires_at(Utc::now().timestamp_millis() + 60_000)
        .sign(server.signing_secret());

    let response = server
        .get("/api/v1/me", Some(&format!("Bearer {}", token)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_expiry_not_after_issued_at_is_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let now = Utc::now().timestamp_millis();
    let token = TestTokenBuilder::new()
        .for_user("alice")
        .issued_at(now + 120_000)
        .expires_at(now + 60_000)
        .sign(server.signing_secret());

    let response = server
        .get("/api/v1/me", Some(&format!("Bearer {}", token)))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
