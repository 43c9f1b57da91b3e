//! Weather handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};
use crate::meteo::MeteoReading;

/// `GET /meteo` — Current weather at the site.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidState`] if the weather client is disabled.
#[utoipa::path(
    get,
    path = "/api/v1/meteo",
    tag = "Meteo",
    summary = "Current weather",
    description = "Returns the cached met.no reading for the observing site, or the fallback atmosphere if the API is unreachable.",
    responses(
        (status = 200, description = "Current reading", body = MeteoReading),
        (status = 409, description = "Weather client disabled", body = ErrorResponse),
    )
)]
pub async fn current_meteo(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    let Some(meteo) = state.pointing_service.meteo().filter(|m| m.is_enabled()) else {
        return Err(GatewayError::InvalidState(
            "weather client is disabled".to_string(),
        ));
    };
    Ok(Json(meteo.current().await))
}

/// Weather routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/meteo", get(current_meteo))
}
