//! Domain events pushed to dashboard clients.
//!
//! Every status change and every new tracking sample emits a
//! [`PointingEvent`] through the [`super::EventBus`]. The serialized shape
//! is the push channel wire contract:
//!
//! ```json
//! {"event": "status_update", "data": {"status": "POINTING", "established": false, "target": "mars", ...}}
//! {"event": "coord_update",  "data": {"alt": 12.5, "az": 300.0}}
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::StatusSnapshot;

/// Horizontal coordinates of the tracked target, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CoordSample {
    /// Altitude above the horizon.
    pub alt: f64,
    /// Azimuth, north through east, in `[0, 360)`.
    pub az: f64,
}

/// Event broadcast to every push channel connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum PointingEvent {
    /// Sent once to each connection right after it opens.
    Connect,
    /// Status, target or established flag changed.
    StatusUpdate(StatusSnapshot),
    /// New alt/az sample for the current target.
    CoordUpdate(CoordSample),
}

impl PointingEvent {
    /// Returns the event name as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::StatusUpdate(_) => "status_update",
            Self::CoordUpdate(_) => "coord_update",
        }
    }
}
