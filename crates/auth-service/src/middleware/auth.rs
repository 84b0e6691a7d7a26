//! Authentication gate.
//!
//! Runs once per request before handlers. Extracts a Bearer token, verifies
//! it, and attaches a [`Principal`] to the request extensions on success.
//! The gate never rejects a request: missing or invalid tokens leave the
//! request unauthenticated and the accept/reject decision is made downstream
//! by the [`Authenticated`] extractor.

use crate::auth::{Principal, TokenVerifier};
use crate::errors::{ApiError, AuthError};
use crate::observability::{hash_for_correlation, metrics::record_gate_decision};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use common::jwt::strip_bearer;
use std::sync::Arc;
use tracing::instrument;

/// Path fragments that bypass the gate.
///
/// A request is exempt when its path *contains* any fragment.
#[derive(Debug, Clone)]
pub struct ExemptPaths {
    fragments: Vec<String>,
}

impl ExemptPaths {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.fragments.iter().any(|f| path.contains(f.as_str()))
    }
}

/// What the gate did with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Path matched the exemption list; nothing was inspected.
    Exempt,
    /// No `Authorization: Bearer <token>` header.
    NoToken,
    /// Token verified and a principal was attached.
    Authenticated,
    /// Token verified but a principal was already attached; left untouched.
    AlreadyAuthenticated,
    /// Token failed verification; nothing attached.
    Rejected(AuthError),
}

impl GateOutcome {
    /// Bounded label for metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            GateOutcome::Exempt => "exempt",
            GateOutcome::NoToken => "no_token",
            GateOutcome::Authenticated => "authenticated",
            GateOutcome::AlreadyAuthenticated => "already_authenticated",
            GateOutcome::Rejected(_) => "rejected",
        }
    }
}

/// The per-request authentication stage.
#[derive(Debug, Clone)]
pub struct AuthGate {
    verifier: Arc<TokenVerifier>,
    exempt: ExemptPaths,
}

impl AuthGate {
    pub fn new(verifier: Arc<TokenVerifier>, exempt: ExemptPaths) -> Self {
        Self { verifier, exempt }
    }

    /// Evaluate one request, attaching a principal to its extensions when
    /// the token verifies and none is attached yet.
    ///
    /// The request is the only context touched; nothing global is read or
    /// written.
    pub fn authenticate<B>(&self, req: &mut axum::http::Request<B>) -> GateOutcome {
        if self.exempt.is_exempt(req.uri().path()) {
            return GateOutcome::Exempt;
        }

        let Some(token) = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(strip_bearer)
        else {
            return GateOutcome::NoToken;
        };

        match self.verifier.verify(token) {
            Ok(principal) => {
                if req.extensions().get::<Principal>().is_some() {
                    return GateOutcome::AlreadyAuthenticated;
                }
                tracing::debug!(
                    target: "auth.gate",
                    subject_hash = %hash_for_correlation(principal.subject()),
                    "Request authenticated"
                );
                req.extensions_mut().insert(principal);
                GateOutcome::Authenticated
            }
            Err(e) => GateOutcome::Rejected(e),
        }
    }
}

/// Middleware wrapper around [`AuthGate::authenticate`].
///
/// Always forwards to the next stage.
#[instrument(skip_all, name = "auth.gate")]
pub async fn auth_gate(
    State(gate): State<Arc<AuthGate>>,
    mut req: Request,
    next: Next,
) -> Response {
    let outcome = gate.authenticate(&mut req);

    tracing::debug!(
        target: "auth.gate",
        outcome = outcome.as_label(),
        path = %req.uri().path(),
        "Authentication gate evaluated"
    );
    record_gate_decision(outcome.as_label());

    next.run(req).await
}

/// Extension trait giving handlers the current principal, if any.
pub trait PrincipalExt {
    /// Returns `None` when the request is unauthenticated.
    fn principal(&self) -> Option<&Principal>;
}

impl<B> PrincipalExt for axum::http::Request<B> {
    fn principal(&self) -> Option<&Principal> {
        self.extensions().get::<Principal>()
    }
}

/// Extractor that requires an authenticated request.
///
/// Rejects with 401 when the gate did not attach a principal. Use
/// `Option<Authenticated>` for handlers that serve both cases.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| {
                tracing::debug!(target: "auth.gate", "Rejecting unauthenticated request");
                ApiError::Unauthorized
            })
    }
}
