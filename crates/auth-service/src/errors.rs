//! Auth service error types.
//!
//! [`AuthError`] carries the internal failure kind for logging and metrics.
//! [`ApiError`] is what clients see: a 401 or a 500, both with empty bodies.
//! Every token failure collapses into the same 401 so malformed, forged and
//! expired tokens cannot be told apart from the outside.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use common::jwt::TokenFormatError;
use thiserror::Error;

/// Token issuance and verification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Token could not be parsed, uses an unsupported algorithm, or lacks
    /// required claims.
    #[error("Malformed token")]
    MalformedToken,

    /// Signature does not match the signing key.
    #[error("Token signature mismatch")]
    BadSignature,

    /// Current time is at or after the token's expiry instant.
    #[error("Token expired")]
    Expired,

    /// Identity (or secondary credential) was empty after trimming.
    #[error("Missing credentials")]
    MissingCredentials,

    /// Claims could not be serialized or signed.
    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Bounded label for metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            AuthError::MalformedToken => "malformed",
            AuthError::BadSignature => "bad_signature",
            AuthError::Expired => "expired",
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::Signing(_) => "signing",
        }
    }
}

impl From<TokenFormatError> for AuthError {
    fn from(_: TokenFormatError) -> Self {
        AuthError::MalformedToken
    }
}

/// HTTP-facing error.
///
/// Maps to:
/// - Unauthorized: 401 with `WWW-Authenticate: Bearer`, empty body
/// - Internal: 500, empty body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(reason) => {
                tracing::error!(target: "auth.errors", reason = %reason, "Token signing failed");
                ApiError::Internal
            }
            other => {
                tracing::debug!(target: "auth.errors", error_category = other.as_label(), "Request not authenticated");
                ApiError::Unauthorized
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = status.into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
