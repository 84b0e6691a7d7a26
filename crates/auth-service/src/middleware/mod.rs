//! Middleware for the auth service.

pub mod auth;
pub mod http_metrics;

pub use auth::{auth_gate, AuthGate, Authenticated, ExemptPaths, GateOutcome, PrincipalExt};
pub use http_metrics::http_metrics_middleware;
