//! Liveness and readiness probes
//!
//! Unlike the comment endpoints these report real HTTP status codes,
//! since orchestrators key off them.

use axum::{extract::State, http::StatusCode, Json};
use comments_service::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// GET /health/ready
///
/// Pings the comment store; 503 when it does not answer.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    match state.service_context().comment_repo().ping().await {
        Ok(()) => (StatusCode::OK, Json(ReadinessResponse::ready())),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse::not_ready()),
        ),
    }
}
