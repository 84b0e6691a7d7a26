//! HTTP routes for the auth service.
//!
//! Defines the Axum router and application state.

use crate::auth::{TokenIssuer, TokenVerifier};
use crate::config::Config;
use crate::crypto::SigningKey;
use crate::handlers;
use crate::middleware::{auth_gate, http_metrics_middleware, AuthGate, ExemptPaths};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Token issuer.
    pub issuer: TokenIssuer,

    /// Authentication gate; shares the issuer's signing key.
    pub gate: Arc<AuthGate>,
}

impl AppState {
    /// Build the issuer, verifier and gate around one signing key.
    pub fn new(config: Config) -> Self {
        let key = Arc::new(SigningKey::from_secret(&config.signing_secret));
        let issuer = TokenIssuer::new(key.clone(), config.token_ttl_ms);
        let verifier = Arc::new(TokenVerifier::new(key));
        let gate = Arc::new(AuthGate::new(
            verifier,
            ExemptPaths::new(config.exempt_paths.iter().cloned()),
        ));

        Self {
            config,
            issuer,
            gate,
        }
    }
}

/// Build the application routes.
///
/// - `POST /auth/token` - token issuance (exempt from the gate)
/// - `GET /actuator/health` - liveness (exempt)
/// - `GET /metrics` - Prometheus metrics
/// - `GET /api/v1/me` - current principal (401 without one)
///
/// Every route runs behind the authentication gate, TraceLayer, a 30 second
/// timeout, and the HTTP metrics middleware (outermost).
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let gate = state.gate.clone();

    let app_routes = Router::new()
        .route("/auth/token", post(handlers::handle_issue_token))
        .route("/actuator/health", get(handlers::health_check))
        .route("/api/v1/me", get(handlers::get_me))
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Layer order (bottom-to-top execution):
    // 1. auth_gate - attach principal (innermost)
    // 2. TimeoutLayer - timeout the request
    // 3. TraceLayer - log request details
    // 4. http_metrics_middleware - record ALL responses (outermost)
    app_routes
        .merge(metrics_routes)
        .layer(middleware::from_fn_with_state(gate, auth_gate))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(http_metrics_middleware))
}
