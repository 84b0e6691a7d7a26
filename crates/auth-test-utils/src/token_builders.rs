//! Builder patterns for test token construction.
//!
//! Produces HS256 tokens with arbitrary claims, headers and keys, including
//! shapes the service itself would never issue (missing claims, foreign
//! algorithms, already expired).

use chrono::Utc;
use common::jwt::encode_segment;
use ring::hmac;
use serde_json::{json, Map, Value};

/// Builder for signed test tokens.
///
/// Timestamps are Unix epoch milliseconds.
///
/// # Example
/// ```rust
/// use auth_test_utils::{test_signing_secret, TestTokenBuilder};
///
/// let token = TestTokenBuilder::new()
///     .for_user("alice")
///     .expires_in_ms(60_000)
///     .sign(&test_signing_secret(1));
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub struct TestTokenBuilder {
    alg: String,
    sub: Option<String>,
    iat: Option<i64>,
    exp: Option<i64>,
    extra: Map<String, Value>,
}

impl TestTokenBuilder {
    /// Defaults: subject `test-subject`, issued now, expiring in one hour.
    pub fn new() -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            alg: "HS256".to_string(),
            sub: Some("test-subject".to_string()),
            iat: Some(now),
            exp: Some(now + 3_600_000),
            extra: Map::new(),
        }
    }

    /// Set the subject.
    pub fn for_user(mut self, subject: &str) -> Self {
        self.sub = Some(subject.to_string());
        self
    }

    /// Omit the `sub` claim.
    pub fn without_subject(mut self) -> Self {
        self.sub = None;
        self
    }

    /// Set the issued-at instant.
    pub fn issued_at(mut self, timestamp_ms: i64) -> Self {
        self.iat = Some(timestamp_ms);
        self
    }

    /// Omit the `iat` claim.
    pub fn without_issued_at(mut self) -> Self {
        self.iat = None;
        self
    }

    /// Set the expiry instant.
    pub fn expires_at(mut self, timestamp_ms: i64) -> Self {
        self.exp = Some(timestamp_ms);
        self
    }

    /// Set expiry relative to the wall clock.
    pub fn expires_in_ms(mut self, ms: i64) -> Self {
        self.exp = Some(Utc::now().timestamp_millis() + ms);
        self
    }

    /// Issued two hours ago, expired one hour ago.
    pub fn expired(mut self) -> Self {
        let now = Utc::now().timestamp_millis();
        self.iat = Some(now - 7_200_000);
        self.exp = Some(now - 3_600_000);
        self
    }

    /// Omit the `exp` claim.
    pub fn without_expiry(mut self) -> Self {
        self.exp = None;
        self
    }

    /// Override the header `alg`. The token is still MAC'd with HS256.
    pub fn with_algorithm(mut self, alg: &str) -> Self {
        self.alg = alg.to_string();
        self
    }

    /// Add an arbitrary extra claim.
    pub fn with_claim(mut self, name: &str, value: Value) -> Self {
        self.extra.insert(name.to_string(), value);
        self
    }

    /// Build the claims as a JSON value.
    pub fn claims(&self) -> Value {
        let mut claims = self.extra.clone();
        if let Some(sub) = &self.sub {
            claims.insert("sub".to_string(), json!(sub));
        }
        if let Some(iat) = self.iat {
            claims.insert("iat".to_string(), json!(iat));
        }
        if let Some(exp) = self.exp {
            claims.insert("exp".to_string(), json!(exp));
        }
        Value::Object(claims)
    }

    /// Sign with HMAC-SHA256 under `secret` and return the compact token.
    pub fn sign(self, secret: &[u8]) -> String {
        let header = json!({ "alg": self.alg, "typ": "JWT" });
        let signing_input = format!(
            "{}.{}",
            encode_segment(header.to_string().as_bytes()),
            encode_segment(self.claims().to_string().as_bytes())
        );
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
        let tag = hmac::sign(&key, signing_input.as_bytes());
        format!("{}.{}", signing_input, encode_segment(tag.as_ref()))
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
