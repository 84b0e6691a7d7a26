//! Integration tests for the authentication gate.
//!
//! The gate never rejects on its own; `/api/v1/me` is the downstream check
//! that turns "no principal" into 401.

use auth_service::models::MeResponse;
use auth_test_utils::{test_signing_secret, TestAuthServer, TestTokenBuilder};
use reqwest::StatusCode;

async fn me_status(server: &TestAuthServer, authorization: Option<&str>) -> Result<StatusCode, anyhow::Error> {
    Ok(server.get("/api/v1/me", authorization).await?.status())
}

// ============================================================================
// Authenticated Requests
// ============================================================================

#[tokio::test]
async fn test_valid_token_reaches_protected_route() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server.issue_token("alice").await?;

    let response = server
        .get("/api/v1/me", Some(&format!("Bearer {}", token)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let me: MeResponse = response.json().await?;
    assert_eq!(me.subject, "alice");
    assert!(me.roles.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_builder_token_with_server_secret_is_accepted() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = TestTokenBuilder::new()
        .for_user("carol")
        .sign(server.signing_secret());

    let response = server
        .get("/api/v1/me", Some(&format!("Bearer {}", token)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let me: MeResponse = response.json().await?;
    assert_eq!(me.subject, "carol");
    Ok(())
}

// ============================================================================
// Unauthenticated Requests
// ============================================================================

#[tokio::test]
async fn test_missing_header_is_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server.get("/api/v1/me", None).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    assert!(response.text().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_bearer_garbage_is_401_downstream() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    assert_eq!(
        me_status(&server, Some("Bearer garbage")).await?,
        StatusCode::UNAUTHORIZED
    );
    Ok(())
}

#[tokio::test]
async fn test_non_bearer_scheme_is_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server.issue_token("alice").await?;

    for value in [
        format!("Basic {}", token),
        format!("bearer {}", token),
        token.clone(),
    ] {
        assert_eq!(
            me_status(&server, Some(&value)).await?,
            StatusCode::UNAUTHORIZED,
            "header {value:?} must not authenticate"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let forged = TestTokenBuilder::new()
        .for_user("mallory")
        .sign(&test_signing_secret(99));

    assert_eq!(
        me_status(&server, Some(&format!("Bearer {}", forged))).await?,
        StatusCode::UNAUTHORIZED
    );
    Ok(())
}

#[tokio::test]
async fn test_tampered_token_is_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server.issue_token("alice").await?;

    let forged_claims = TestTokenBuilder::new().for_user("mallory").claims();
    let mut segments: Vec<String> = token.split('.').map(String::from).collect();
    if let Some(payload) = segments.get_mut(1) {
        *payload = common::jwt::encode_segment(forged_claims.to_string().as_bytes());
    }
    let tampered = segments.join(".");

    assert_eq!(
        me_status(&server, Some(&format!("Bearer {}", tampered))).await?,
        StatusCode::UNAUTHORIZED
    );
    Ok(())
}

#[tokio::test]
async fn test_foreign_algorithm_is_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = TestTokenBuilder::new()
        .with_algorithm("none")
        .sign(server.signing_secret());

    assert_eq!(
        me_status(&server, Some(&format!("Bearer {}", token))).await?,
        StatusCode::UNAUTHORIZED
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_claims_are_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    for token in [
        TestTokenBuilder::new()
            .without_subject()
            .sign(server.signing_secret()),
        TestTokenBuilder::new()
            .without_expiry()
            .sign(server.signing_secret()),
        TestTokenBuilder::new()
            .for_user("")
            .sign(server.signing_secret()),
    ] {
        assert_eq!(
            me_status(&server, Some(&format!("Bearer {}", token))).await?,
            StatusCode::UNAUTHORIZED
        );
    }
    Ok(())
}

// ============================================================================
// Exempt Paths
// ============================================================================

#[tokio::test]
async fn test_exempt_paths_ignore_invalid_tokens() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .get("/actuator/health", Some("Bearer garbage"))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = server
        .client()
        .post(format!("{}/auth/token", server.url()))
        .header("authorization", "Bearer garbage")
        .json(&serde_json::json!({"username": "alice", "password": "pw"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_requests_are_isolated() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let alice = server.issue_token("alice").await?;
    let bob = server.issue_token("bob").await?;

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = server.client().clone();
        let url = format!("{}/api/v1/me", server.url());
        let (expected, header) = match i % 3 {
            0 => (Some("alice"), Some(format!("Bearer {}", alice))),
            1 => (Some("bob"), Some(format!("Bearer {}", bob))),
            _ => (None, Some("Bearer garbage".to_string())),
        };
        tasks.push(tokio::spawn(async move {
            let mut request = client.get(url);
            if let Some(value) = header {
                request = request.header("authorization", value);
            }
            let response = request.send().await?;
            let subject = if response.status() == StatusCode::OK {
                Some(response.json::<MeResponse>().await?.subject)
            } else {
                None
            };
            Ok::<_, anyhow::Error>((expected, subject))
        }));
    }

    for task in tasks {
        let (expected, subject) = task.await??;
        assert_eq!(subject.as_deref(), expected);
    }
    Ok(())
}
