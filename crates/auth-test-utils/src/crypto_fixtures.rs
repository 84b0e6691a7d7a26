//! Deterministic signing secrets and configs for testing.
//!
//! The same seed always produces the same secret.

use auth_service::config::{Config, DEFAULT_EXEMPT_PATHS};
use common::secret::SecretBox;

/// Seed used by [`test_config`] and the default test server.
pub const DEFAULT_TEST_SEED: u8 = 1;

/// Generate a deterministic 32-byte signing secret.
///
/// Every byte is printable ASCII so the secret is also a valid
/// `AUTH_JWT_SECRET` value.
///
/// # Example
/// ```rust
/// use auth_test_utils::test_signing_secret;
///
/// assert_eq!(test_signing_secret(1), test_signing_secret(1));
/// assert_ne!(test_signing_secret(1), test_signing_secret(2));
/// assert_eq!(test_signing_secret(1).len(), 32);
/// ```
pub fn test_signing_secret(seed: u8) -> Vec<u8> {
    (0..32u8)
        .map(|i| b'!' + (seed.wrapping_mul(31).wrapping_add(i.wrapping_mul(7)) % 94))
        .collect()
}

/// A config bound to `127.0.0.1:0` using the default test secret.
pub fn test_config(token_ttl_ms: u64) -> Config {
    test_config_with_seed(DEFAULT_TEST_SEED, token_ttl_ms)
}

/// A config bound to `127.0.0.1:0` using the secret for `seed`.
pub fn test_config_with_seed(seed: u8, token_ttl_ms: u64) -> Config {
    Config {
        bind_address: "127.0.0.1:0".to_string(),
        signing_secret: SecretBox::new(Box::new(test_signing_secret(seed))),
        token_ttl_ms,
        exempt_paths: DEFAULT_EXEMPT_PATHS.iter().map(ToString::to_string).collect(),
        drain_seconds: 0,
    }
}
