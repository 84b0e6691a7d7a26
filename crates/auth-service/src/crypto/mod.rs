//! Signing key and HMAC-SHA256 primitives.
//!
//! A single [`SigningKey`] is built at startup from the configured secret and
//! shared (via `Arc`) by the issuer and the verifier. Signing goes through
//! `jsonwebtoken`; verification recomputes the MAC with `ring::hmac::verify`,
//! which compares in constant time.

use crate::auth::Claims;
use crate::errors::AuthError;
use common::secret::{ExposeSecret, SecretBox};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use ring::hmac;
use std::fmt;
use tracing::instrument;

/// Process-wide symmetric signing key.
///
/// Read-only after construction. Debug output never includes key material.
pub struct SigningKey {
    secret: SecretBox<Vec<u8>>,
    hmac_key: hmac::Key,
    encoding_key: EncodingKey,
}

impl SigningKey {
    /// Build a key from raw secret bytes.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: SecretBox::new(Box::new(secret.to_vec())),
            hmac_key: hmac::Key::new(hmac::HMAC_SHA256, secret),
            encoding_key: EncodingKey::from_secret(secret),
        }
    }

    /// Build a key from a secret already held in a `SecretBox`.
    pub fn from_secret(secret: &SecretBox<Vec<u8>>) -> Self {
        Self::new(secret.expose_secret())
    }

    /// Length of the secret in bytes.
    pub fn len(&self) -> usize {
        self.secret.expose_secret().len()
    }

    /// True if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.secret.expose_secret().is_empty()
    }

    /// Sign claims into a compact HS256 token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if the claims cannot be serialized.
    #[instrument(skip_all)]
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(target: "auth.crypto", error = %e, "Token signing failed");
            AuthError::Signing(format!("Token signing failed: {}", e))
        })
    }

    /// Check a MAC over `signing_input` in constant time.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BadSignature` on mismatch.
    pub fn verify_signature(&self, signing_input: &[u8], signature: &[u8]) -> Result<(), AuthError> {
        hmac::verify(&self.hmac_key, signing_input, signature).map_err(|_| AuthError::BadSignature)
    }

    /// Raw HMAC-SHA256 tag over `message`.
    pub fn mac(&self, message: &[u8]) -> Vec<u8> {
        hmac::sign(&self.hmac_key, message).as_ref().to_vec()
    }
}

impl Clone for SigningKey {
    fn clone(&self) -> Self {
        Self::new(self.secret.expose_secret())
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
