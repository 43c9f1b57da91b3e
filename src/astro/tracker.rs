//! Alt/az tracker for solar system bodies.

use chrono::{DateTime, Utc};

use super::Body;
use super::angles::{cos_deg, tan_deg};
use super::ephemeris::{day_number, equatorial};
use super::site::Site;
use crate::domain::{CoordSample, Meteorological};
use crate::error::GatewayError;

/// Standard temperature assumed when only a pressure reading is available.
const DEFAULT_TEMPERATURE_C: f64 = 10.0;

/// Computes where a body stands in the sky of a fixed site.
#[derive(Debug, Clone, Copy)]
pub struct Tracker {
    site: Site,
}

impl Tracker {
    /// Creates a tracker for the given site.
    #[must_use]
    pub const fn new(site: Site) -> Self {
        Self { site }
    }

    /// Returns the observing site.
    #[must_use]
    pub const fn site(&self) -> &Site {
        &self.site
    }

    /// Computes the apparent altitude and azimuth of `body` at `at`.
    ///
    /// The Moon is corrected for topocentric parallax. When `conditions`
    /// carries a non-zero pressure, atmospheric refraction is added.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Tracking`] if the computation yields a
    /// non-finite angle.
    pub fn alt_az(
        &self,
        body: Body,
        at: DateTime<Utc>,
        conditions: &Meteorological,
    ) -> Result<CoordSample, GatewayError> {
        let millis = at.timestamp_millis();
        let eq = equatorial(body, day_number(millis));
        let (mut alt, az) = self.site.horizontal(&eq, millis);

        if body == Body::Moon {
            alt -= lunar_parallax_deg(eq.distance) * cos_deg(alt);
        }
        alt += refraction_deg(alt, conditions);

        if !alt.is_finite() || !az.is_finite() {
            return Err(GatewayError::Tracking(format!(
                "non-finite position for {body}"
            )));
        }
        Ok(CoordSample { alt, az })
    }
}

/// Horizontal parallax of the Moon at `distance` Earth radii.
fn lunar_parallax_deg(distance: f64) -> f64 {
    (1.0 / distance).clamp(-1.0, 1.0).asin().to_degrees()
}

/// Sæmundsson refraction for a true altitude, scaled by pressure and
/// temperature. Zero when no pressure is known or below -1°.
fn refraction_deg(alt: f64, conditions: &Meteorological) -> f64 {
    let Some(pressure) = conditions.pressure.filter(|p| *p > 0.0) else {
        return 0.0;
    };
    if alt < -1.0 {
        return 0.0;
    }
    let temperature = conditions.temperature.unwrap_or(DEFAULT_TEMPERATURE_C);
    let arcmin = 1.02 / tan_deg(alt + 10.3 / (alt + 5.11));
    arcmin / 60.0 * (pressure / 1010.0) * (283.0 / (273.0 + temperature))
}

/// Rounds both coordinates to `decimals` places, keeping azimuth in
/// `[0, 360)`. Values that round to zero come out as `+0.0`.
#[must_use]
pub fn round_sample(sample: CoordSample, decimals: u32) -> CoordSample {
    let factor = 10_f64.powi(i32::try_from(decimals).unwrap_or(12));
    // adding +0.0 turns -0.0 into 0.0
    let az = (sample.az * factor).round() / factor + 0.0;
    CoordSample {
        alt: (sample.alt * factor).round() / factor + 0.0,
        az: if az >= 360.0 { az - 360.0 } else { az },
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        let Some(at) = Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single() else {
            panic!("invalid date");
        };
        at
    }

    #[test]
    fn sun_at_paris_solar_noon_on_equinox() {
        let tracker = Tracker::new(Site::default());
        // Solar noon in Paris on 2024-03-20 falls near 11:58 UTC.
        let Ok(sample) = tracker.alt_az(Body::Sun, at(2024, 3, 20, 11, 58), &Meteorological::default())
        else {
            panic!("tracking failed");
        };
        assert!((sample.alt - 41.5).abs() < 1.0, "alt {}", sample.alt);
        assert!((sample.az - 180.0).abs() < 3.0, "az {}", sample.az);
    }

    #[test]
    fn sun_is_below_horizon_at_paris_midnight() {
        let tracker = Tracker::new(Site::default());
        let Ok(sample) = tracker.alt_az(Body::Sun, at(2024, 12, 21, 23, 50), &Meteorological::default())
        else {
            panic!("tracking failed");
        };
        assert!(sample.alt < -50.0, "alt {}", sample.alt);
        assert!((0.0..360.0).contains(&sample.az));
    }

    #[test]
    fn refraction_lifts_low_targets() {
        let conditions = Meteorological {
            temperature: Some(10.0),
            pressure: Some(1010.0),
            humidity: Some(0.5),
        };
        let at_horizon = refraction_deg(0.0, &conditions);
        // about 29 arcminutes at the horizon
        assert!((at_horizon - 0.483).abs() < 0.01, "refraction {at_horizon}");
        assert!(refraction_deg(45.0, &conditions) < 0.02);
        assert!(refraction_deg(-5.0, &conditions).abs() < f64::EPSILON);
    }

    #[test]
    fn refraction_disabled_without_pressure() {
        let conditions = Meteorological {
            temperature: Some(10.0),
            pressure: None,
            humidity: None,
        };
        assert!(refraction_deg(5.0, &conditions).abs() < f64::EPSILON);
        let zero = Meteorological {
            pressure: Some(0.0),
            ..conditions
        };
        assert!(refraction_deg(5.0, &zero).abs() < f64::EPSILON);
    }

    #[test]
    fn moon_parallax_is_about_one_degree() {
        let parallax = lunar_parallax_deg(60.27);
        assert!((parallax - 0.95).abs() < 0.02);
    }

    #[test]
    fn rounding_keeps_requested_precision() {
        let sample = round_sample(
            CoordSample {
                alt: 12.345_678,
                az: 299.999_96,
            },
            4,
        );
        assert!((sample.alt - 12.3457).abs() < 1e-9);
        assert!((sample.az - 300.0).abs() < 1e-9);

        let wrapped = round_sample(CoordSample { alt: 0.0, az: 359.999_99 }, 2);
        assert!(wrapped.az.abs() < 1e-9);
    }

    #[test]
    fn tiny_negative_altitude_rounds_to_positive_zero() {
        let sample = round_sample(
            CoordSample {
                alt: -0.000_01,
                az: 120.0,
            },
            4,
        );
        assert!(!sample.alt.is_sign_negative());
        assert_eq!(format!("{}", sample.alt), "0");
        assert_eq!(serde_json::to_string(&sample.alt).ok().as_deref(), Some("0.0"));
    }
}
