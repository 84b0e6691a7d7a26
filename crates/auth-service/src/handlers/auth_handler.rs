//! Token issuance handler.

use crate::errors::{ApiError, AuthError};
use crate::models::{TokenRequest, TokenResponse, TOKEN_TYPE_BEARER};
use crate::observability::metrics::record_token_issuance;
use crate::routes::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Handle token issuance.
///
/// POST /auth/token
///
/// Any non-blank username/password pair is accepted; the username becomes the
/// token subject. Blank, missing, or unparseable credentials yield 401 with
/// an empty body.
#[instrument(skip_all, name = "auth.handlers.issue_token", fields(status))]
pub async fn handle_issue_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let start = Instant::now();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(
                target: "auth.handlers.issue_token",
                error = %rejection,
                "Unreadable token request body"
            );
            TokenRequest::default()
        }
    };

    let result = if request.has_credentials() {
        state.issuer.issue(&request.username)
    } else {
        Err(AuthError::MissingCredentials)
    };

    let status = if result.is_ok() { "success" } else { "error" };
    tracing::Span::current().record("status", status);
    record_token_issuance(status, start.elapsed());

    let issued = result?;

    Ok(Json(TokenResponse {
        token: issued.token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: issued.expires_in_ms,
    }))
}
