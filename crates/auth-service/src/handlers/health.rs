//! Liveness handler.

use crate::models::HealthResponse;
use axum::Json;

/// Handler for GET /actuator/health
///
/// The service holds no external connections, so liveness is readiness.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
    })
}
