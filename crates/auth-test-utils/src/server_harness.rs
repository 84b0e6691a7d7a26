//! Test server harness for E2E testing
//!
//! Provides `TestAuthServer` for spawning real auth service instances in tests.

use crate::crypto_fixtures::test_config;
use auth_service::config::{Config, DEFAULT_TOKEN_TTL_MS};
use auth_service::models::TokenResponse;
use auth_service::observability::metrics::init_metrics_recorder;
use auth_service::routes::{self, AppState};
use common::secret::ExposeSecret;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Test harness for spawning the auth service in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_issue_flow() -> Result<()> {
///     let server = TestAuthServer::spawn().await?;
///     let client = reqwest::Client::new();
///
///     let response = client
///         .post(format!("{}/auth/token", server.url()))
///         .json(&serde_json::json!({"username": "alice", "password": "pw"}))
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestAuthServer {
    addr: SocketAddr,
    config: Config,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestAuthServer {
    /// Spawn with the default test secret and the default 24h TTL.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_config(test_config(DEFAULT_TOKEN_TTL_MS)).await
    }

    /// Spawn with the default test secret and a custom TTL.
    pub async fn spawn_with_ttl(token_ttl_ms: u64) -> Result<Self, anyhow::Error> {
        Self::spawn_with_config(test_config(token_ttl_ms)).await
    }

    /// Spawn a server instance from `config`.
    ///
    /// The server binds to a random available port on 127.0.0.1 regardless
    /// of `config.bind_address` and runs in the background until dropped.
    pub async fn spawn_with_config(config: Config) -> Result<Self, anyhow::Error> {
        let state = Arc::new(AppState::new(config.clone()));

        // The global recorder can only be installed once per process; later
        // servers get a standalone recorder.
        let metrics_handle = match init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => PrometheusBuilder::new().build_recorder().handle(),
        };

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
            if let Err(e) = axum::serve(listener, make_service).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The raw signing secret, for crafting tokens with `TestTokenBuilder`.
    pub fn signing_secret(&self) -> &[u8] {
        self.config.signing_secret.expose_secret()
    }

    /// Shared HTTP client.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Issue a token through `POST /auth/token`.
    pub async fn issue_token(&self, username: &str) -> Result<String, anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/auth/token", self.url()))
            .json(&serde_json::json!({ "username": username, "password": "test-password" }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Token issuance failed with status {}", response.status());
        }

        let body: TokenResponse = response.json().await?;
        Ok(body.token)
    }

    /// `GET path` with an optional raw `Authorization` header value.
    pub async fn get(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let mut request = self.client.get(format!("{}{}", self.url(), path));
        if let Some(value) = authorization {
            request = request.header("authorization", value);
        }
        Ok(request.send().await?)
    }
}

impl Drop for TestAuthServer {
    fn drop(&mut self) {
        // Abort the server task so the port is released when the test ends
        self._handle.abort();
    }
}
