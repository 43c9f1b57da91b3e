//! Push connection loop.
//!
//! Greets the client with a `connect` frame followed by the current
//! `status_update`, then forwards every bus event until either side
//! goes away.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::PointingEvent;
use crate::service::PointingService;

type WsSink = SplitSink<WebSocket, Message>;

/// Runs the write loop for a single push connection.
///
/// Incoming text and binary frames are ignored; a close frame or a
/// dropped socket ends the loop.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<PointingEvent>,
    pointing_service: Arc<PointingService>,
) {
    let conn_id = Uuid::new_v4();
    let (mut ws_tx, mut ws_rx) = socket.split();
    tracing::info!(%conn_id, "push client connected");

    let greeting = [
        PointingEvent::Connect,
        PointingEvent::StatusUpdate(pointing_service.status().await),
    ];
    for event in &greeting {
        if send_event(&mut ws_tx, event).await.is_err() {
            tracing::debug!(%conn_id, "push client left during greeting");
            return;
        }
    }

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match next_step(event, conn_id) {
                    Step::Forward(event) => {
                        if send_event(&mut ws_tx, &event).await.is_err() {
                            break;
                        }
                    }
                    Step::Skip => {}
                    Step::Close => break,
                }
            }
        }
    }

    tracing::info!(%conn_id, "push client disconnected");
}

/// What to do with one result from the bus receiver.
#[derive(Debug, PartialEq)]
enum Step {
    Forward(PointingEvent),
    Skip,
    Close,
}

fn next_step(event: Result<PointingEvent, broadcast::error::RecvError>, conn_id: Uuid) -> Step {
    match event {
        Ok(event) => Step::Forward(event),
        Err(broadcast::error::RecvError::Lagged(n)) => {
            tracing::warn!(%conn_id, lagged = n, "push client lagged behind event bus");
            Step::Skip
        }
        Err(broadcast::error::RecvError::Closed) => Step::Close,
    }
}

async fn send_event(ws_tx: &mut WsSink, event: &PointingEvent) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(err) => {
            tracing::error!(error = %err, event = event.event_type_str(), "failed to encode event");
            return Ok(());
        }
    };
    ws_tx.send(Message::text(json)).await
}
