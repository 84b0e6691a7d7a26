//! Bearer-token authentication service library.
//!
//! Mints signed, time-bounded identity tokens and verifies them on every
//! inbound request without any server-side session state.
//!
//! # Architecture
//!
//! ```text
//! routes/mod.rs -> middleware/auth.rs (gate) -> handlers/*.rs
//!                          |                        |
//!                  auth/verifier.rs           auth/issuer.rs
//!                          \________ crypto ________/
//! ```
//!
//! # Modules
//!
//! - `auth` - Claims, principal, token issuer and verifier
//! - `config` - Service configuration from environment
//! - `crypto` - HMAC-SHA256 signing key
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - Authentication gate and HTTP metrics
//! - `models` - Request/response bodies
//! - `observability` - Metrics and log correlation helpers
//! - `routes` - Axum router setup

pub mod auth;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
