//! Metrics definitions for the auth service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `auth_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `status`: success, error
//! - `error_category`: none, malformed, bad_signature, expired, missing_credentials, signing
//! - `outcome`: exempt, no_token, authenticated, already_authenticated, rejected
//! - `method`: HTTP methods
//! - `endpoint`: known routes, everything else collapses to `/other`

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize the Prometheus metrics recorder and return the handle used to
/// render `/metrics`.
///
/// Must be called before any metrics are recorded.
///
/// # Errors
///
/// Returns an error if the recorder cannot be installed (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("auth_http_request".to_string()),
            &[
                0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.200, 0.500, 1.000, 2.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        // Issuance is one HMAC; anything past a few ms is an outlier
        .set_buckets_for_metric(
            Matcher::Prefix("auth_token_issuance".to_string()),
            &[0.0001, 0.0005, 0.001, 0.002, 0.005, 0.010, 0.025, 0.050],
        )
        .map_err(|e| format!("Failed to set token issuance buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// Token Metrics
// ============================================================================

/// Record token issuance.
///
/// Metric: `auth_token_issuance_total`, `auth_token_issuance_duration_seconds`
/// Labels: `status`
pub fn record_token_issuance(status: &str, duration: Duration) {
    histogram!("auth_token_issuance_duration_seconds",
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("auth_token_issuance_total",
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record token verification outcome.
///
/// Metric: `auth_token_validations_total`
/// Labels: `status`, `error_category`
pub fn record_token_validation(status: &str, error_category: Option<&str>) {
    counter!("auth_token_validations_total",
        "status" => status.to_string(),
        "error_category" => error_category.unwrap_or("none").to_string()
    )
    .increment(1);
}

/// Record an authentication gate decision.
///
/// Metric: `auth_gate_decisions_total`
/// Labels: `outcome`
pub fn record_gate_decision(outcome: &str) {
    counter!("auth_gate_decisions_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion.
///
/// Metric: `auth_http_requests_total`, `auth_http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status` / `status_code`
///
/// Recorded for every response, including framework-level 404/405/415.
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let normalized_endpoint = normalize_endpoint(endpoint);
    let status = categorize_status_code(status_code);

    histogram!("auth_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint.to_string(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("auth_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint.to_string(),
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Collapse unknown paths to `/other` to bound label cardinality.
fn normalize_endpoint(path: &str) -> &'static str {
    match path {
        "/auth/token" => "/auth/token",
        "/actuator/health" => "/actuator/health",
        "/metrics" => "/metrics",
        "/api/v1/me" => "/api/v1/me",
        _ => "/other",
    }
}
