//! Token issuer.

use crate::auth::Claims;
use crate::crypto::SigningKey;
use crate::errors::AuthError;
use crate::observability::hash_for_correlation;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

/// A freshly minted token.
#[derive(Clone)]
pub struct IssuedToken {
    /// Compact signed token.
    pub token: String,

    /// Configured lifetime in milliseconds.
    pub expires_in_ms: u64,

    /// Absolute expiry, Unix epoch milliseconds.
    pub expires_at_ms: i64,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[REDACTED]")
            .field("expires_in_ms", &self.expires_in_ms)
            .field("expires_at_ms", &self.expires_at_ms)
            .finish()
    }
}

/// Mints signed, time-bounded tokens for an identity.
///
/// No credential checks happen here; any non-blank identity is accepted.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: Arc<SigningKey>,
    ttl_ms: u64,
}

impl TokenIssuer {
    pub fn new(key: Arc<SigningKey>, ttl_ms: u64) -> Self {
        Self { key, ttl_ms }
    }

    /// Configured token lifetime in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Issue a token for `identity`, valid from now for the configured TTL.
    ///
    /// # Errors
    ///
    /// - `MissingCredentials` - identity is empty after trimming
    /// - `Signing` - claims could not be signed
    pub fn issue(&self, identity: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(identity, Utc::now().timestamp_millis())
    }

    /// Issue a token as if the current time were `now_ms`.
    ///
    /// The subject is stored exactly as given; trimming only decides whether
    /// the identity counts as empty.
    #[instrument(skip_all, fields(subject_hash))]
    pub fn issue_at(&self, identity: &str, now_ms: i64) -> Result<IssuedToken, AuthError> {
        if identity.trim().is_empty() {
            tracing::debug!(target: "auth.token.issuer", "Refusing to issue token for empty identity");
            return Err(AuthError::MissingCredentials);
        }

        let ttl = i64::try_from(self.ttl_ms)
            .map_err(|_| AuthError::Signing("Token TTL out of range".to_string()))?;
        let exp = now_ms
            .checked_add(ttl)
            .ok_or_else(|| AuthError::Signing("Token expiry overflows".to_string()))?;

        let claims = Claims {
            sub: identity.to_string(),
            iat: now_ms,
            exp,
        };

        let token = self.key.sign(&claims)?;

        let subject_hash = hash_for_correlation(identity);
        tracing::Span::current().record("subject_hash", subject_hash.as_str());
        tracing::debug!(
            target: "auth.token.issuer",
            subject_hash = %subject_hash,
            expires_at_ms = exp,
            "Issued token"
        );

        Ok(IssuedToken {
            token,
            expires_in_ms: self.ttl_ms,
            expires_at_ms: exp,
        })
    }
}
