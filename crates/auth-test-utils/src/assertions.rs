//! Custom test assertions for expressive tests.
//!
//! Provides trait-based assertions over compact tokens.

use common::jwt::{decode_segment, split_token, HS256, JWT_TYPE};
use serde::Deserialize;

/// Claims as the service issues them (epoch milliseconds).
#[derive(Debug, Deserialize)]
struct IssuedClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

fn claims_of(token: &str) -> IssuedClaims {
    let payload = token
        .split('.')
        .nth(1)
        .unwrap_or_else(|| panic!("token has no claims segment"));
    let bytes = decode_segment(payload).expect("claims segment must be base64url");
    serde_json::from_slice(&bytes).expect("claims must be JSON with sub/iat/exp")
}

/// Custom assertions for tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_subject("alice")
///     .assert_lifetime_ms(86_400_000);
/// ```
pub trait TokenAssertions {
    /// Assert compact HS256 structure with `typ: JWT`.
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert the `sub` claim.
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert `exp - iat` equals `ttl_ms`.
    fn assert_lifetime_ms(&self, ttl_ms: i64) -> &Self;

    /// Assert `exp` lies in the future.
    fn assert_not_expired(&self) -> &Self;
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        self.as_str().assert_valid_jwt();
        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        self.as_str().assert_for_subject(subject);
        self
    }

    fn assert_lifetime_ms(&self, ttl_ms: i64) -> &Self {
        self.as_str().assert_lifetime_ms(ttl_ms);
        self
    }

    fn assert_not_expired(&self) -> &Self {
        self.as_str().assert_not_expired();
        self
    }
}

impl TokenAssertions for str {
    fn assert_valid_jwt(&self) -> &Self {
        let parts = split_token(self).unwrap_or_else(|e| panic!("not a valid token: {e:?}"));
        assert_eq!(parts.header.alg, HS256, "Expected HS256 algorithm");
        assert_eq!(
            parts.header.typ.as_deref(),
            Some(JWT_TYPE),
            "Expected JWT type"
        );
        assert_eq!(parts.signature.len(), 32, "HS256 signature must be 32 bytes");
        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = claims_of(self);
        assert_eq!(claims.sub, subject, "Unexpected token subject");
        self
    }

    fn assert_lifetime_ms(&self, ttl_ms: i64) -> &Self {
        let claims = claims_of(self);
        assert_eq!(
            claims.exp - claims.iat,
            ttl_ms,
            "Token lifetime (exp - iat) mismatch"
        );
        self
    }

    fn assert_not_expired(&self) -> &Self {
        let claims = claims_of(self);
        let now = chrono::Utc::now().timestamp_millis();
        assert!(
            claims.exp > now,
            "Token expired at {} (now {})",
            claims.exp,
            now
        );
        self
    }
}
