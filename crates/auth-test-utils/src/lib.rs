//! # Auth Test Utilities
//!
//! Shared test utilities for the auth service.
//!
//! This crate provides:
//! - Deterministic signing secrets and configs
//! - `TestTokenBuilder` for crafting tokens with arbitrary claims and keys
//! - Server test harness (`TestAuthServer` for E2E tests)
//! - Custom assertions (`TokenAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let server = TestAuthServer::spawn().await?;
//!     let token = server.issue_token("alice").await?;
//!
//!     token.assert_valid_jwt().assert_for_subject("alice");
//!
//!     let expired = TestTokenBuilder::new()
//!         .for_user("alice")
//!         .expired()
//!         .sign(&test_signing_secret(1));
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod crypto_fixtures;
pub mod server_harness;
pub mod token_builders;

pub use assertions::*;
pub use crypto_fixtures::*;
pub use server_harness::*;
pub use token_builders::*;
