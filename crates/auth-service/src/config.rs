//! Auth service configuration.
//!
//! Configuration is loaded from environment variables. The signing secret is
//! held in a `SecretBox` and redacted in Debug output.

use common::secret::{ExposeSecret, SecretBox};
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Minimum signing secret length in bytes.
///
/// HS256 keys shorter than the hash output (32 bytes) weaken the MAC.
pub const MIN_SIGNING_SECRET_BYTES: usize = 32;

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL_MS: u64 = 86_400_000;

/// Upper bound on the configurable token lifetime: 30 days.
pub const MAX_TOKEN_TTL_MS: u64 = 30 * 86_400_000;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Paths the authentication gate skips by default.
///
/// Matched by substring against the request path.
pub const DEFAULT_EXEMPT_PATHS: [&str; 4] =
    ["/auth/token", "/swagger-ui", "/api-docs", "/actuator/health"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid signing secret: {0}")]
    InvalidSigningSecret(String),

    #[error("Invalid token TTL configuration: {0}")]
    InvalidTokenTtl(String),

    #[error("Invalid exempt paths configuration: {0}")]
    InvalidExemptPaths(String),

    #[error("Invalid drain configuration: {0}")]
    InvalidDrainSeconds(String),
}

/// Auth service configuration.
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// HMAC-SHA256 signing secret shared by issuer and verifier.
    pub signing_secret: SecretBox<Vec<u8>>,

    /// Lifetime of issued tokens in milliseconds.
    pub token_ttl_ms: u64,

    /// Request path fragments that bypass the authentication gate.
    pub exempt_paths: Vec<String>,

    /// Seconds to keep serving in-flight requests after a shutdown signal.
    pub drain_seconds: u64,
}

impl Clone for Config {
    fn clone(&self) -> Self {
        Self {
            bind_address: self.bind_address.clone(),
            signing_secret: SecretBox::new(Box::new(self.signing_secret.expose_secret().clone())),
            token_ttl_ms: self.token_ttl_ms,
            exempt_paths: self.exempt_paths.clone(),
            drain_seconds: self.drain_seconds,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("signing_secret", &"[REDACTED]")
            .field("token_ttl_ms", &self.token_ttl_ms)
            .field("exempt_paths", &self.exempt_paths)
            .field("drain_seconds", &self.drain_seconds)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let secret = vars
            .get("AUTH_JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("AUTH_JWT_SECRET".to_string()))?;

        if secret.len() < MIN_SIGNING_SECRET_BYTES {
            return Err(ConfigError::InvalidSigningSecret(format!(
                "Expected at least {} bytes, got {}",
                MIN_SIGNING_SECRET_BYTES,
                secret.len()
            )));
        }
        let signing_secret = SecretBox::new(Box::new(secret.as_bytes().to_vec()));

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let token_ttl_ms = if let Some(value_str) = vars.get("AUTH_TOKEN_TTL_MS") {
            let value: u64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidTokenTtl(format!(
                    "AUTH_TOKEN_TTL_MS must be a valid positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value == 0 {
                return Err(ConfigError::InvalidTokenTtl(
                    "AUTH_TOKEN_TTL_MS must be greater than 0".to_string(),
                ));
            }

            if value > MAX_TOKEN_TTL_MS {
                return Err(ConfigError::InvalidTokenTtl(format!(
                    "AUTH_TOKEN_TTL_MS must not exceed {} ms, got {}",
                    MAX_TOKEN_TTL_MS, value
                )));
            }

            value
        } else {
            DEFAULT_TOKEN_TTL_MS
        };

        let exempt_paths = if let Some(value_str) = vars.get("AUTH_EXEMPT_PATHS") {
            let paths: Vec<String> = value_str
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(ToString::to_string)
                .collect();

            if paths.is_empty() {
                return Err(ConfigError::InvalidExemptPaths(
                    "AUTH_EXEMPT_PATHS must list at least one path".to_string(),
                ));
            }

            paths
        } else {
            DEFAULT_EXEMPT_PATHS.iter().map(ToString::to_string).collect()
        };

        let drain_seconds = match vars.get("AUTH_DRAIN_SECONDS") {
            Some(value_str) => value_str.parse().map_err(|e| {
                ConfigError::InvalidDrainSeconds(format!(
                    "AUTH_DRAIN_SECONDS must be a valid non-negative integer, got '{}': {}",
                    value_str, e
                ))
            })?,
            None => 0,
        };

        Ok(Config {
            bind_address,
            signing_secret,
            token_ttl_ms,
            exempt_paths,
            drain_seconds,
        })
    }
}
