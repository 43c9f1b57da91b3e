//! Service layer: pointing orchestration.

pub mod pointing_service;

pub use pointing_service::{PointingRequest, PointingService, TrackingSettings};
