//! Integration tests for operational endpoints.

use auth_test_utils::TestAuthServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_health_endpoint_returns_up() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server.get("/actuator/health", None).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "UP");
    Ok(())
}

#[tokio::test]
async fn test_metrics_endpoint_is_reachable() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    // Generate some traffic first
    server.issue_token("alice").await?;
    let response = server.get("/metrics", None).await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_unknown_path_is_404() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server.get("/api/v1/clients", None).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
