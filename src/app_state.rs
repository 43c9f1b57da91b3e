//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::PointingService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pointing service for all business logic.
    pub pointing_service: Arc<PointingService>,
    /// Event bus for push channel subscriptions.
    pub event_bus: EventBus,
}
