//! Degree-based trigonometry helpers.

/// Sine of an angle in degrees.
#[must_use]
pub fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

/// Cosine of an angle in degrees.
#[must_use]
pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

/// Tangent of an angle in degrees.
#[must_use]
pub fn tan_deg(deg: f64) -> f64 {
    deg.to_radians().tan()
}

/// Four-quadrant arctangent of `y / x`, in degrees.
#[must_use]
pub fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Wraps an angle into `[0, 360)`.
#[must_use]
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_both_directions() {
        assert!((normalize_deg(-90.0) - 270.0).abs() < 1e-12);
        assert!((normalize_deg(725.0) - 5.0).abs() < 1e-12);
        assert!(normalize_deg(-1e-18) < 360.0);
    }

    #[test]
    fn atan2_quadrants() {
        assert!((atan2_deg(1.0, 0.0) - 90.0).abs() < 1e-12);
        assert!((atan2_deg(-1.0, -1.0) + 135.0).abs() < 1e-12);
    }
}
