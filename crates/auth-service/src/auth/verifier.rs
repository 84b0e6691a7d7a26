//! Token verifier.
//!
//! Verification order:
//! 1. Split the token and check the header (`MalformedToken`)
//! 2. Recompute the MAC and compare in constant time (`BadSignature`)
//! 3. Parse claims and require `sub` and `exp` (`MalformedToken`)
//! 4. Reject when `now >= exp` (`Expired`)
//!
//! Claims are never interpreted before the signature has been checked.

use crate::auth::{claims::RawClaims, Principal};
use crate::crypto::SigningKey;
use crate::errors::AuthError;
use crate::observability::metrics::record_token_validation;
use chrono::Utc;
use common::jwt::split_token;
use std::sync::Arc;
use tracing::instrument;

/// Validates tokens against the shared signing key.
///
/// A pure function of (token, key, now); holds no mutable state and is safe
/// to call from any number of requests at once.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    key: Arc<SigningKey>,
}

impl TokenVerifier {
    pub fn new(key: Arc<SigningKey>) -> Self {
        Self { key }
    }

    /// Verify `token` against the current wall-clock time.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    /// Verify `token` as if the current time were `now_ms`.
    ///
    /// # Errors
    ///
    /// - `MalformedToken` - bad structure, unsupported algorithm, or missing claims
    /// - `BadSignature` - MAC mismatch
    /// - `Expired` - `now_ms >= exp`
    #[instrument(skip_all)]
    pub fn verify_at(&self, token: &str, now_ms: i64) -> Result<Principal, AuthError> {
        let result = self.check(token, now_ms);

        match &result {
            Ok(_) => record_token_validation("success", None),
            Err(e) => {
                tracing::debug!(
                    target: "auth.token.verifier",
                    error_category = e.as_label(),
                    "Token verification failed"
                );
                record_token_validation("error", Some(e.as_label()));
            }
        }

        result
    }

    fn check(&self, token: &str, now_ms: i64) -> Result<Principal, AuthError> {
        let parts = split_token(token)?;

        self.key
            .verify_signature(parts.signing_input.as_bytes(), &parts.signature)?;

        let claims = RawClaims::parse(&parts.payload)?.into_claims()?;

        if now_ms >= claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(Principal::new(claims.sub))
    }
}
