//! Token claims and the authenticated principal.

use crate::errors::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claims carried by every issued token.
///
/// Timestamps are Unix epoch milliseconds. The `sub` field is redacted in
/// Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the identity the token was issued to).
    pub sub: String,

    /// Issued-at instant.
    pub iat: i64,

    /// Expiry instant. A token is invalid once `now >= exp`.
    pub exp: i64,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .finish()
    }
}

/// Claims as found on the wire, before required fields are checked.
///
/// Missing fields deserialize to `None` so that absence surfaces as
/// `MalformedToken` rather than a raw parse error.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
}

impl RawClaims {
    /// Parse raw claim bytes.
    pub(crate) fn parse(payload: &[u8]) -> Result<Self, AuthError> {
        serde_json::from_slice(payload).map_err(|e| {
            tracing::debug!(target: "auth.token.verifier", error = %e, "Failed to parse token claims");
            AuthError::MalformedToken
        })
    }

    /// Enforce required claims.
    ///
    /// `sub` must be present and non-empty and `exp` must be present. When
    /// `iat` is present, `exp` must be strictly after it.
    pub(crate) fn into_claims(self) -> Result<Claims, AuthError> {
        let sub = self
            .sub
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MalformedToken)?;
        let exp = self.exp.ok_or(AuthError::MalformedToken)?;

        if let Some(iat) = self.iat {
            if exp <= iat {
                return Err(AuthError::MalformedToken);
            }
        }

        Ok(Claims {
            sub,
            iat: self.iat.unwrap_or(i64::MIN),
            exp,
        })
    }
}

/// The authenticated identity attached to a request.
///
/// Created by the authentication gate after successful verification. At most
/// one exists per request; its absence means the request is unauthenticated.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
    roles: Vec<String>,
}

impl Principal {
    /// Principal for `subject` with no roles.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            roles: Vec::new(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Always empty; tokens carry no role claims.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("subject", &"[REDACTED]")
            .field("roles", &self.roles)
            .finish()
    }
}
