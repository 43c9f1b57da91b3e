//! Observing site and the equatorial → horizontal transform.

use serde::Serialize;
use utoipa::ToSchema;

use super::angles::{atan2_deg, cos_deg, normalize_deg, sin_deg};
use super::ephemeris::{Equatorial, julian_date};
use crate::error::GatewayError;

/// Geodetic location of the antenna or telescope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Site {
    /// Latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Height above sea level in metres.
    pub height_m: f64,
}

impl Default for Site {
    /// Paris, Hôtel de Ville.
    fn default() -> Self {
        Self {
            latitude_deg: 48.85341,
            longitude_deg: 2.3488,
            height_m: 42.0,
        }
    }
}

impl Site {
    /// Creates a validated site.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidSite`] if the latitude is outside
    /// `[-90, 90]`, the longitude outside `[-180, 180]`, or any value is
    /// not finite.
    pub fn new(latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Result<Self, GatewayError> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(GatewayError::InvalidSite(format!(
                "latitude {latitude_deg} out of range"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(GatewayError::InvalidSite(format!(
                "longitude {longitude_deg} out of range"
            )));
        }
        if !height_m.is_finite() {
            return Err(GatewayError::InvalidSite("height must be finite".to_string()));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            height_m,
        })
    }

    /// Local mean sidereal time in degrees at the given Unix timestamp.
    #[must_use]
    pub fn local_sidereal_deg(&self, unix_millis: i64) -> f64 {
        normalize_deg(greenwich_sidereal_deg(unix_millis) + self.longitude_deg)
    }

    /// Converts a geocentric equatorial position to `(alt, az)` in degrees
    /// as seen from this site. Azimuth runs north through east.
    #[must_use]
    pub fn horizontal(&self, eq: &Equatorial, unix_millis: i64) -> (f64, f64) {
        let hour_angle = self.local_sidereal_deg(unix_millis) - eq.ra_deg;
        let lat = self.latitude_deg;
        let sin_alt = sin_deg(lat) * sin_deg(eq.dec_deg)
            + cos_deg(lat) * cos_deg(eq.dec_deg) * cos_deg(hour_angle);
        let alt = sin_alt.clamp(-1.0, 1.0).asin().to_degrees();
        let az = atan2_deg(
            -cos_deg(eq.dec_deg) * sin_deg(hour_angle),
            sin_deg(eq.dec_deg) * cos_deg(lat) - cos_deg(eq.dec_deg) * cos_deg(hour_angle) * sin_deg(lat),
        );
        (alt, normalize_deg(az))
    }
}

/// Greenwich mean sidereal time in degrees (IAU 1982 expression).
#[must_use]
pub fn greenwich_sidereal_deg(unix_millis: i64) -> f64 {
    let jd = julian_date(unix_millis);
    let t = (jd - 2_451_545.0) / 36_525.0;
    normalize_deg(
        280.460_618_37 + 360.985_647_366_29 * (jd - 2_451_545.0) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}
