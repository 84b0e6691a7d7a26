//! Request and response bodies.

use common::secret::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Token type advertised in issuance responses.
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Issuance request body.
///
/// Missing fields deserialize as empty and are rejected by the handler.
/// The password is held in a `SecretString` so Debug output redacts it.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: Option<SecretString>,
}

impl TokenRequest {
    /// True when both username and password are non-blank.
    pub fn has_credentials(&self) -> bool {
        let password_present = self
            .password
            .as_ref()
            .is_some_and(|p| !p.expose_secret().trim().is_empty());

        !self.username.trim().is_empty() && password_present
    }
}

/// Issuance response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in milliseconds.
    pub expires_in: u64,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Response for `/api/v1/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub subject: String,
    pub roles: Vec<String>,
}
