//! Typed decoding of push frames.

use serde::Deserialize;

/// Status label that reveals the content panel.
pub const POINTING: &str = "POINTING";

/// Errors raised by the dashboard.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DashboardError {
    /// Required elements were absent at bind time.
    #[error("missing dashboard elements: {}", .0.join(", "))]
    MissingElements(Vec<String>),

    /// A push frame could not be decoded.
    #[error("malformed event: {0}")]
    MalformedEvent(String),
}

/// Payload of a `status_update` frame.
///
/// `status` is an open label set; fields the dashboard does not show,
/// like the recorded conditions, are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusUpdate {
    /// Status label, e.g. `POINTING` or `IDLE`.
    pub status: String,
    /// Whether the mount confirmed it is on target.
    pub established: bool,
    /// Target name; present whenever `status` is `POINTING`.
    #[serde(default)]
    pub target: Option<String>,
}

impl StatusUpdate {
    /// Whether this update reveals the content panel.
    #[must_use]
    pub fn is_pointing(&self) -> bool {
        self.status == POINTING
    }
}

/// Payload of a `coord_update` frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CoordUpdate {
    /// Altitude.
    pub alt: f64,
    /// Azimuth.
    pub az: f64,
}

/// A decoded push frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum PushFrame {
    /// Greeting sent on every new connection.
    Connect,
    /// Pointing status changed.
    StatusUpdate(StatusUpdate),
    /// New coordinates of the tracked body.
    CoordUpdate(CoordUpdate),
}

impl PushFrame {
    /// Decodes and validates one text frame.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MalformedEvent`] if the frame is not JSON,
    /// names an unknown event, lacks a required field, or reports
    /// `POINTING` without a target.
    pub fn decode(frame: &str) -> Result<Self, DashboardError> {
        let decoded: Self = serde_json::from_str(frame)
            .map_err(|err| DashboardError::MalformedEvent(err.to_string()))?;
        if let Self::StatusUpdate(update) = &decoded
            && update.is_pointing()
            && update.target.is_none()
        {
            return Err(DashboardError::MalformedEvent(
                "POINTING status without a target".to_string(),
            ));
        }
        Ok(decoded)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_status_frame() {
        let frame = r#"{"event":"status_update","data":{"status":"POINTING","target":"mars",
            "established":false,"meteorological":{"temperature":null,"pressure":null,"humidity":null}}}"#;
        let Ok(PushFrame::StatusUpdate(update)) = PushFrame::decode(frame) else {
            panic!("expected a status update");
        };
        assert!(update.is_pointing());
        assert_eq!(update.target.as_deref(), Some("mars"));
    }

    #[test]
    fn decodes_connect_with_or_without_data() {
        assert_eq!(PushFrame::decode(r#"{"event":"connect"}"#), Ok(PushFrame::Connect));
        assert_eq!(
            PushFrame::decode(r#"{"event":"connect","data":null}"#),
            Ok(PushFrame::Connect)
        );
    }

    #[test]
    fn idle_status_needs_no_target() {
        let frame = r#"{"event":"status_update","data":{"status":"IDLE","established":false}}"#;
        let Ok(PushFrame::StatusUpdate(update)) = PushFrame::decode(frame) else {
            panic!("expected a status update");
        };
        assert_eq!(update.target, None);
    }

    #[test]
    fn rejects_malformed_frames() {
        for frame in [
            "not json",
            r#"{"event":"reboot","data":{}}"#,
            r#"{"event":"coord_update","data":{"alt":1.0}}"#,
            r#"{"event":"status_update","data":{"status":"IDLE"}}"#,
            r#"{"event":"status_update","data":{"status":"POINTING","established":true}}"#,
            r#"{"event":"status_update","data":{"status":"POINTING","established":true,"target":null}}"#,
        ] {
            assert!(
                matches!(PushFrame::decode(frame), Err(DashboardError::MalformedEvent(_))),
                "accepted {frame}"
            );
        }
    }

    #[test]
    fn missing_elements_message_lists_ids() {
        let err = DashboardError::MissingElements(vec!["alt".to_string(), "az".to_string()]);
        assert_eq!(err.to_string(), "missing dashboard elements: alt, az");
    }
}
