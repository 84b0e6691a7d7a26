//! Current principal handler.

use crate::middleware::Authenticated;
use crate::models::MeResponse;
use axum::Json;
use tracing::instrument;

/// Handler for GET /api/v1/me
///
/// Returns the principal the authentication gate attached. Unauthenticated
/// requests are rejected with 401 by the [`Authenticated`] extractor.
///
/// ```json
/// { "subject": "alice", "roles": [] }
/// ```
#[instrument(skip_all, name = "auth.handlers.me")]
pub async fn get_me(Authenticated(principal): Authenticated) -> Json<MeResponse> {
    tracing::debug!(target: "auth.handlers.me", "Returning current principal");

    Json(MeResponse {
        subject: principal.subject().to_string(),
        roles: principal.roles().to_vec(),
    })
}
