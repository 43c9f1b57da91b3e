//! Domain layer: pointing status, push events and the event bus.
//!
//! This module contains the server-side domain model: the validated
//! status owned by [`StatusManager`], the [`PointingEvent`]s derived from
//! it, and the [`EventBus`] that fans them out to push channel clients.

pub mod event_bus;
pub mod pointing_event;
pub mod status;
pub mod status_manager;

pub use event_bus::EventBus;
pub use pointing_event::{CoordSample, PointingEvent};
pub use status::{AppStatus, Meteorological, StatusSnapshot};
pub use status_manager::StatusManager;
