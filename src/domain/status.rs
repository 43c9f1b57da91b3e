//! Pointing status value types shared by the service, REST and push layers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Top-level pointing status of the gateway.
///
/// Serialized as the literal strings `"IDLE"` and `"POINTING"`, which is
/// what dashboard clients compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppStatus {
    /// No target; the mount is parked or free.
    #[default]
    Idle,
    /// Tracking a named target.
    Pointing,
}

impl AppStatus {
    /// Returns the wire label of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Pointing => "POINTING",
        }
    }
}

impl std::fmt::Display for AppStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Atmospheric conditions at the observing site.
///
/// Every reading is optional. `pressure` drives the refraction correction;
/// a missing or zero pressure disables it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Meteorological {
    /// Air temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Air pressure in hectopascals.
    pub pressure: Option<f64>,
    /// Relative humidity as a fraction in `0..=1`.
    pub humidity: Option<f64>,
}

impl Meteorological {
    /// Returns a copy where every missing reading is taken from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            temperature: self.temperature.or(fallback.temperature),
            pressure: self.pressure.or(fallback.pressure),
            humidity: self.humidity.or(fallback.humidity),
        }
    }

    /// Returns `true` when every reading is present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.temperature.is_some() && self.pressure.is_some() && self.humidity.is_some()
    }
}

/// Point-in-time view of the pointing status.
///
/// This is both the body of `GET /status` and the payload of every
/// `status_update` push event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusSnapshot {
    /// Current status.
    pub status: AppStatus,
    /// Target name while pointing, `null` otherwise.
    pub target: Option<String>,
    /// Whether the mount confirmed it is on target.
    pub established: bool,
    /// Conditions recorded for the current pointing.
    pub meteorological: Meteorological,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_upper_case_label() {
        let json = serde_json::to_string(&AppStatus::Pointing).unwrap_or_default();
        assert_eq!(json, "\"POINTING\"");
        assert_eq!(AppStatus::Idle.to_string(), "IDLE");
    }

    #[test]
    fn meteorological_or_fills_only_missing() {
        let supplied = Meteorological {
            temperature: Some(-3.0),
            pressure: None,
            humidity: None,
        };
        let fallback = Meteorological {
            temperature: Some(15.0),
            pressure: Some(1013.25),
            humidity: Some(0.5),
        };
        let merged = supplied.or(fallback);
        assert_eq!(merged.temperature, Some(-3.0));
        assert_eq!(merged.pressure, Some(1013.25));
        assert!(merged.is_complete());
        assert!(!supplied.is_complete());
    }

    #[test]
    fn snapshot_field_names_match_push_contract() {
        let snapshot = StatusSnapshot {
            status: AppStatus::Pointing,
            target: Some("mars".to_string()),
            established: false,
            meteorological: Meteorological::default(),
        };
        let value = serde_json::to_value(&snapshot).unwrap_or_default();
        assert_eq!(value["status"], "POINTING");
        assert_eq!(value["target"], "mars");
        assert_eq!(value["established"], false);
        assert!(value["meteorological"]["pressure"].is_null());
    }
}
