//! Pointing handlers: start, stop, establish, body catalog.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{BodyInfo, PointingForm};
use crate::app_state::AppState;
use crate::astro::Body;
use crate::domain::StatusSnapshot;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /pointing` — Start pointing at a body.
///
/// # Errors
///
/// Returns [`GatewayError`] on an undecodable body, a blank or unknown
/// target, or non-finite readings.
#[utoipa::path(
    post,
    path = "/api/v1/pointing",
    tag = "Pointing",
    summary = "Point at a body",
    description = "Sets the status to POINTING and starts tracking. Readings left out are filled from the weather API when enabled.",
    request_body = PointingForm,
    responses(
        (status = 202, description = "Tracking started", body = StatusSnapshot),
        (status = 400, description = "Invalid body, target or readings", body = ErrorResponse),
    )
)]
pub async fn point_to(
    State(state): State<AppState>,
    payload: Result<Json<PointingForm>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(form) =
        payload.map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
    let snapshot = state.pointing_service.point_to(form.into()).await?;
    Ok((StatusCode::ACCEPTED, Json(snapshot)))
}

/// `POST /pointing/stop` — Stop tracking and return to idle.
#[utoipa::path(
    post,
    path = "/api/v1/pointing/stop",
    tag = "Pointing",
    summary = "Stop pointing",
    description = "Cancels tracking and sets the status to IDLE. Idempotent.",
    responses(
        (status = 200, description = "Now idle", body = StatusSnapshot),
    )
)]
pub async fn stop_pointing(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.pointing_service.stop_pointing().await)
}

/// `POST /pointing/establish` — Confirm the mount is on target.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidState`] when not pointing.
#[utoipa::path(
    post,
    path = "/api/v1/pointing/establish",
    tag = "Pointing",
    summary = "Mark pointing as established",
    description = "Sets the established flag of the current pointing.",
    responses(
        (status = 200, description = "Pointing established", body = StatusSnapshot),
        (status = 409, description = "Not pointing", body = ErrorResponse),
    )
)]
pub async fn establish(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.pointing_service.establish().await?))
}

/// `GET /bodies` — List trackable bodies.
#[utoipa::path(
    get,
    path = "/api/v1/bodies",
    tag = "Pointing",
    summary = "List trackable bodies",
    description = "Returns every body name accepted as a pointing target.",
    responses(
        (status = 200, description = "Body catalog", body = Vec<BodyInfo>),
    )
)]
pub async fn list_bodies() -> impl IntoResponse {
    let bodies: Vec<BodyInfo> = Body::ALL.into_iter().map(BodyInfo::from).collect();
    Json(bodies)
}

/// Pointing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pointing", post(point_to))
        .route("/pointing/stop", post(stop_pointing))
        .route("/pointing/establish", post(establish))
        .route("/bodies", get(list_bodies))
}
