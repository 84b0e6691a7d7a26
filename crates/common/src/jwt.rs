//! Compact token format primitives shared by the issuer, verifier, and tests.
//!
//! Tokens use the JWS compact serialization:
//!
//! ```text
//! base64url(header) "." base64url(claims) "." base64url(signature)
//! ```
//!
//! This module only knows about the *shape* of a token. It never touches key
//! material and never decides whether a token is valid; callers layer the
//! signature check and claims validation on top of [`split_token`].
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE any decoding (DoS prevention)
//! - Only `HS256` is accepted in the header; `none` and every asymmetric
//!   algorithm are rejected as malformed
//! - Error messages are generic; details are logged at debug level

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed token size in bytes (8KB).
///
/// Tokens larger than this are rejected before base64 decoding or MAC
/// computation. A typical token here is well under 300 bytes.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// The only signature algorithm accepted in token headers.
pub const HS256: &str = "HS256";

/// Token type advertised in the header.
pub const JWT_TYPE: &str = "JWT";

/// Scheme prefix of the `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

// =============================================================================
// Error Types
// =============================================================================

/// Structural problems detected while splitting a token.
///
/// Every variant renders the same message so the error can never be used as an
/// oracle; the variant itself is kept for debug logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenFormatError {
    /// Token size exceeds [`MAX_JWT_SIZE_BYTES`].
    #[error("The access token is invalid or expired")]
    TokenTooLarge,

    /// Token does not have exactly three non-empty segments.
    #[error("The access token is invalid or expired")]
    WrongSegmentCount,

    /// A segment is not valid unpadded base64url.
    #[error("The access token is invalid or expired")]
    InvalidEncoding,

    /// Header segment is not a JSON object with a string `alg`.
    #[error("The access token is invalid or expired")]
    InvalidHeader,

    /// Header names an algorithm other than `HS256`.
    #[error("The access token is invalid or expired")]
    UnsupportedAlgorithm,
}

// =============================================================================
// Types
// =============================================================================

/// Decoded token header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Signature algorithm identifier.
    pub alg: String,

    /// Optional media type, `JWT` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

/// A token split into its segments, with the header and signature decoded.
///
/// The claims payload is decoded to bytes but *not* parsed: claims must not be
/// interpreted until the signature over `signing_input` has been checked.
#[derive(Debug)]
pub struct TokenParts<'a> {
    /// Decoded header.
    pub header: TokenHeader,

    /// `header "." claims` exactly as received; the MAC is computed over this.
    pub signing_input: &'a str,

    /// Raw claims JSON bytes.
    pub payload: Vec<u8>,

    /// Raw signature bytes.
    pub signature: Vec<u8>,
}

// =============================================================================
// Functions
// =============================================================================

/// Encode bytes as an unpadded base64url segment.
#[must_use]
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode one unpadded base64url segment.
///
/// # Errors
///
/// Returns `TokenFormatError::InvalidEncoding` for padding, characters outside
/// the url-safe alphabet, or non-canonical trailing bits.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenFormatError> {
    URL_SAFE_NO_PAD.decode(segment).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to decode token segment");
        TokenFormatError::InvalidEncoding
    })
}

/// Split a compact token and decode its header and signature.
///
/// # Errors
///
/// - `TokenTooLarge` - token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - `WrongSegmentCount` - not exactly three non-empty segments
/// - `InvalidEncoding` - a segment is not base64url
/// - `InvalidHeader` - header is not JSON with a string `alg`
/// - `UnsupportedAlgorithm` - `alg` is anything other than `HS256`
pub fn split_token(token: &str) -> Result<TokenParts<'_>, TokenFormatError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(TokenFormatError::TokenTooLarge);
    }

    let mut segments = token.split('.');
    let (header_b64, payload_b64, signature_b64) =
        match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(h), Some(p), Some(s), None) if !h.is_empty() && !p.is_empty() && !s.is_empty() => {
                (h, p, s)
            }
            _ => {
                tracing::debug!(target: "common.jwt", "Token rejected: invalid segment structure");
                return Err(TokenFormatError::WrongSegmentCount);
            }
        };

    let header_bytes = decode_segment(header_b64)?;
    let header: TokenHeader = serde_json::from_slice(&header_bytes).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to parse token header JSON");
        TokenFormatError::InvalidHeader
    })?;

    if header.alg != HS256 {
        tracing::debug!(target: "common.jwt", alg = %header.alg, "Token rejected: unsupported algorithm");
        return Err(TokenFormatError::UnsupportedAlgorithm);
    }

    let payload = decode_segment(payload_b64)?;
    let signature = decode_segment(signature_b64)?;

    // header + '.' + payload; the lengths come from the split above
    let signing_input = token
        .get(..header_b64.len() + 1 + payload_b64.len())
        .ok_or(TokenFormatError::WrongSegmentCount)?;

    Ok(TokenParts {
        header,
        signing_input,
        payload,
        signature,
    })
}

/// Extract the token from an `Authorization` header value.
///
/// Returns `None` unless the value starts with exactly `"Bearer "` and has a
/// non-empty remainder.
#[must_use]
pub fn strip_bearer(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}

// =============================================================================
// Tests
// =============================================================================
