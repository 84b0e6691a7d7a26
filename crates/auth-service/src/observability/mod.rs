//! Observability for the auth service.
//!
//! # Privacy by Default
//!
//! Instrumentation uses `#[instrument(skip_all)]` with explicit fields.
//! Fields fall into three groups:
//! - **SAFE**: logged in plaintext (outcomes, error categories, durations)
//! - **HASHED**: SHA-256 truncated for correlation (subjects)
//! - **NEVER**: must not appear in logs (tokens, passwords, the signing secret)

pub mod metrics;

use sha2::{Digest, Sha256};

/// Hash a value for correlation in logs (SHA-256, first 8 hex chars).
///
/// Used for subjects, which need correlating across log lines but should
/// not be stored in plaintext. This is a one-way correlation aid, not a
/// secret-protection mechanism.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    hex::encode(result.get(..4).unwrap_or_default())
}
