//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;

/// `GET /ws` — Upgrade HTTP connection to the push channel.
///
/// The subscription is taken before the upgrade so no event published
/// during the handshake is missed.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let event_rx = state.event_bus.subscribe();
    let pointing_service = Arc::clone(&state.pointing_service);

    ws.on_upgrade(move |socket| run_connection(socket, event_rx, pointing_service))
}
