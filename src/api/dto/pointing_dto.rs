//! Pointing request and catalog DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::astro::Body;
use crate::domain::Meteorological;
use crate::service::PointingRequest;

/// Request body for `POST /api/v1/pointing`.
///
/// Mirrors the dashboard's pointing form: the object name plus the
/// optional advanced-settings readings.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PointingForm {
    /// Object to point at (e.g. `"mars"`).
    #[serde(alias = "target")]
    pub obj: String,
    /// Air temperature in °C.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Air pressure in hPa.
    #[serde(default)]
    pub pressure: Option<f64>,
    /// Relative humidity as a fraction in `0..=1`.
    #[serde(default)]
    pub humidity: Option<f64>,
}

impl From<PointingForm> for PointingRequest {
    fn from(form: PointingForm) -> Self {
        Self {
            target: form.obj,
            conditions: Meteorological {
                temperature: form.temperature,
                pressure: form.pressure,
                humidity: form.humidity,
            },
        }
    }
}

/// Kind of a trackable body.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// The Sun.
    Star,
    /// The Moon.
    Satellite,
    /// Anything else.
    Planet,
}

/// Entry of `GET /api/v1/bodies`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BodyInfo {
    /// Name accepted by `POST /api/v1/pointing`.
    pub name: Body,
    /// Kind of body.
    pub kind: BodyKind,
}

impl From<Body> for BodyInfo {
    fn from(body: Body) -> Self {
        let kind = match body {
            Body::Sun => BodyKind::Star,
            Body::Moon => BodyKind::Satellite,
            _ => BodyKind::Planet,
        };
        Self { name: body, kind }
    }
}
