//! Token issuance and verification.
//!
//! Both halves share one [`SigningKey`](crate::crypto::SigningKey) instance.

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::{Claims, Principal};
pub use issuer::{IssuedToken, TokenIssuer};
pub use verifier::TokenVerifier;
