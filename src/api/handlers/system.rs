//! System endpoints: health check and current status.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::StatusSnapshot;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    push_clients: usize,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp and the number of connected push clients.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            push_clients: state.event_bus.receiver_count(),
        }),
    )
}

/// `GET /status` — Current pointing status.
#[utoipa::path(
    get,
    path = "/status",
    tag = "System",
    summary = "Current status",
    description = "Returns the status, target, established flag and recorded conditions. Same payload as the status_update push event.",
    responses(
        (status = 200, description = "Current status", body = StatusSnapshot),
    )
)]
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.pointing_service.status().await)
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
}
