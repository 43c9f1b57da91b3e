//! met.no `locationforecast/2.0/compact` response model.
//!
//! Only the fields the gateway reads are modelled; serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::Meteorological;
use crate::error::GatewayError;

/// Top-level GeoJSON feature returned by met.no.
#[derive(Debug, Deserialize)]
pub struct Forecast {
    /// Feature properties.
    pub properties: Properties,
}

/// Forecast properties.
#[derive(Debug, Deserialize)]
pub struct Properties {
    /// Hourly (then six-hourly) forecast steps.
    pub timeseries: Vec<TimeStep>,
}

/// One forecast step.
#[derive(Debug, Deserialize)]
pub struct TimeStep {
    /// Valid time of the step.
    pub time: DateTime<Utc>,
    /// Step data.
    pub data: StepData,
}

/// Data attached to a forecast step.
#[derive(Debug, Deserialize)]
pub struct StepData {
    /// Instantaneous values at `time`.
    pub instant: InstantData,
}

/// Instantaneous values wrapper.
#[derive(Debug, Deserialize)]
pub struct InstantData {
    /// The values themselves.
    pub details: InstantDetails,
}

/// Instantaneous weather values.
#[derive(Debug, Deserialize)]
pub struct InstantDetails {
    /// Air temperature in °C.
    pub air_temperature: f64,
    /// Sea-level pressure in hPa.
    pub air_pressure_at_sea_level: f64,
    /// Relative humidity in percent.
    pub relative_humidity: f64,
}

impl From<&InstantDetails> for Meteorological {
    fn from(details: &InstantDetails) -> Self {
        Self {
            temperature: Some(details.air_temperature),
            pressure: Some(details.air_pressure_at_sea_level),
            humidity: Some(details.relative_humidity / 100.0),
        }
    }
}

impl Forecast {
    /// Returns the step whose valid time is closest to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Meteo`] if the timeseries is empty.
    pub fn closest(&self, now: DateTime<Utc>) -> Result<&TimeStep, GatewayError> {
        self.properties
            .timeseries
            .iter()
            .min_by_key(|step| (step.time - now).num_seconds().unsigned_abs())
            .ok_or_else(|| GatewayError::Meteo("no timeseries data available".to_string()))
    }

    /// Returns the conditions of the step closest to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Meteo`] if the timeseries is empty.
    pub fn conditions_at(&self, now: DateTime<Utc>) -> Result<Meteorological, GatewayError> {
        self.closest(now)
            .map(|step| Meteorological::from(&step.data.instant.details))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"{
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [2.3488, 48.8534, 42]},
        "properties": {
            "meta": {"updated_at": "2025-01-01T10:00:00Z"},
            "timeseries": [
                {"time": "2025-01-01T10:00:00Z", "data": {"instant": {"details": {
                    "air_pressure_at_sea_level": 1021.4, "air_temperature": 3.1,
                    "relative_humidity": 88.0, "wind_speed": 2.4}}}},
                {"time": "2025-01-01T11:00:00Z", "data": {"instant": {"details": {
                    "air_pressure_at_sea_level": 1020.9, "air_temperature": 4.0,
                    "relative_humidity": 81.0}}}},
                {"time": "2025-01-01T12:00:00Z", "data": {"instant": {"details": {
                    "air_pressure_at_sea_level": 1020.2, "air_temperature": 5.2,
                    "relative_humidity": 75.0}}}}
            ]
        }
    }"#;

    fn forecast() -> Forecast {
        let Ok(forecast) = serde_json::from_str::<Forecast>(SAMPLE) else {
            panic!("sample forecast failed to parse");
        };
        forecast
    }

    #[test]
    fn picks_step_closest_to_now() {
        let Some(now) = Utc.with_ymd_and_hms(2025, 1, 1, 11, 20, 0).single() else {
            panic!("invalid date");
        };
        let Ok(conditions) = forecast().conditions_at(now) else {
            panic!("expected conditions");
        };
        assert_eq!(conditions.temperature, Some(4.0));
        assert_eq!(conditions.pressure, Some(1020.9));
        assert_eq!(conditions.humidity, Some(0.81));
    }

    #[test]
    fn picks_first_step_when_now_is_earlier() {
        let Some(now) = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).single() else {
            panic!("invalid date");
        };
        let forecast = forecast();
        let Ok(step) = forecast.closest(now) else {
            panic!("expected a step");
        };
        assert_eq!(step.data.instant.details.air_temperature, 3.1);
    }

    #[test]
    fn empty_timeseries_is_an_error() {
        let Ok(empty) =
            serde_json::from_str::<Forecast>(r#"{"properties": {"timeseries": []}}"#)
        else {
            panic!("empty forecast failed to parse");
        };
        assert!(matches!(
            empty.conditions_at(Utc::now()),
            Err(GatewayError::Meteo(_))
        ));
    }
}
