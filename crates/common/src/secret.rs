//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports the [`secrecy`] types used for the token signing secret and
//! for credentials received on the issuance endpoint.
//!
//! `SecretBox<T>` and `SecretString` implement `Debug` with redaction, so a
//! struct deriving `Debug` that holds one of them is safe to log via `{:?}`
//! or tracing. Secrets are zeroized when dropped.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretBox};
//!
//! #[derive(Debug)]
//! struct KeyMaterial {
//!     label: &'static str,
//!     bytes: SecretBox<Vec<u8>>,
//! }
//!
//! let key = KeyMaterial {
//!     label: "hs256",
//!     bytes: SecretBox::new(Box::new(b"0123456789abcdef0123456789abcdef".to_vec())),
//! };
//!
//! let rendered = format!("{key:?}");
//! assert!(rendered.contains("hs256"));
//! assert!(!rendered.contains("0123456789abcdef"));
//! assert_eq!(key.bytes.expose_secret().len(), 32);
//! ```
//!
//! # Usage Guidelines
//!
//! Use `SecretString` for:
//! - Passwords / secondary credentials on the issuance request
//! - Bearer tokens held outside the request pipeline
//!
//! Use `SecretBox<Vec<u8>>` for:
//! - The HMAC signing secret

pub use secrecy::{ExposeSecret, SecretBox, SecretString};
