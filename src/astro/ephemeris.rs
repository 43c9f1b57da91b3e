//! Low-precision geocentric positions from mean orbital elements.
//!
//! Elements are referred to the ecliptic and equinox of date and evolve
//! linearly with the day number `d` (days since 2000 Jan 0.0 UT). Kepler's
//! equation is solved by Newton iteration; the largest Jupiter/Saturn and
//! lunar perturbations are applied. Accuracy is a few arcminutes for the
//! Sun and Moon and better than a quarter degree for the planets, which is
//! ample for pointing a dish or a finder scope.

use super::Body;
use super::angles::{atan2_deg, cos_deg, normalize_deg, sin_deg};

/// Equatorial coordinates of date as seen from the centre of the Earth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension in degrees, `[0, 360)`.
    pub ra_deg: f64,
    /// Declination in degrees.
    pub dec_deg: f64,
    /// Distance in AU for the Sun and planets, Earth radii for the Moon.
    pub distance: f64,
}

/// Keplerian elements at a given day number. Angles in degrees.
#[derive(Debug, Clone, Copy)]
struct Orbit {
    /// Longitude of the ascending node.
    node: f64,
    /// Inclination.
    incl: f64,
    /// Argument of perihelion.
    peri: f64,
    /// Semi-major axis.
    axis: f64,
    /// Eccentricity.
    ecc: f64,
    /// Mean anomaly.
    mean_anomaly: f64,
}

#[derive(Debug, Clone, Copy)]
struct Ecliptic {
    lon: f64,
    lat: f64,
    r: f64,
}

impl Ecliptic {
    fn from_rect(x: f64, y: f64, z: f64) -> Self {
        Self {
            lon: normalize_deg(atan2_deg(y, x)),
            lat: atan2_deg(z, x.hypot(y)),
            r: (x * x + y * y + z * z).sqrt(),
        }
    }

    fn to_rect(self) -> (f64, f64, f64) {
        (
            self.r * cos_deg(self.lon) * cos_deg(self.lat),
            self.r * sin_deg(self.lon) * cos_deg(self.lat),
            self.r * sin_deg(self.lat),
        )
    }
}

/// Converts a Unix-epoch timestamp in milliseconds to the day number used
/// by the orbital elements.
#[must_use]
pub fn day_number(unix_millis: i64) -> f64 {
    julian_date(unix_millis) - 2_451_543.5
}

/// Julian date of a Unix-epoch timestamp in milliseconds.
#[must_use]
pub fn julian_date(unix_millis: i64) -> f64 {
    unix_millis as f64 / 86_400_000.0 + 2_440_587.5
}

/// Obliquity of the ecliptic at day number `d`.
fn obliquity(d: f64) -> f64 {
    23.4393 - 3.563e-7 * d
}

fn orbit(body: Body, d: f64) -> Orbit {
    match body {
        Body::Sun => Orbit {
            node: 0.0,
            incl: 0.0,
            peri: 282.9404 + 4.70935e-5 * d,
            axis: 1.0,
            ecc: 0.016709 - 1.151e-9 * d,
            mean_anomaly: 356.0470 + 0.985_600_258_5 * d,
        },
        Body::Moon => Orbit {
            node: 125.1228 - 0.052_953_808_3 * d,
            incl: 5.1454,
            peri: 318.0634 + 0.164_357_322_3 * d,
            axis: 60.2666,
            ecc: 0.054900,
            mean_anomaly: 115.3654 + 13.064_992_950_9 * d,
        },
        Body::Mercury => Orbit {
            node: 48.3313 + 3.24587e-5 * d,
            incl: 7.0047 + 5.00e-8 * d,
            peri: 29.1241 + 1.01444e-5 * d,
            axis: 0.387098,
            ecc: 0.205635 + 5.59e-10 * d,
            mean_anomaly: 168.6562 + 4.092_334_436_8 * d,
        },
        Body::Venus => Orbit {
            node: 76.6799 + 2.46590e-5 * d,
            incl: 3.3946 + 2.75e-8 * d,
            peri: 54.8910 + 1.38374e-5 * d,
            axis: 0.723330,
            ecc: 0.006773 - 1.302e-9 * d,
            mean_anomaly: 48.0052 + 1.602_130_224_4 * d,
        },
        Body::Mars => Orbit {
            node: 49.5574 + 2.11081e-5 * d,
            incl: 1.8497 - 1.78e-8 * d,
            peri: 286.5016 + 2.92961e-5 * d,
            axis: 1.523688,
            ecc: 0.093405 + 2.516e-9 * d,
            mean_anomaly: 18.6021 + 0.524_020_776_6 * d,
        },
        Body::Jupiter => Orbit {
            node: 100.4542 + 2.76854e-5 * d,
            incl: 1.3030 - 1.557e-7 * d,
            peri: 273.8777 + 1.64505e-5 * d,
            axis: 5.20256,
            ecc: 0.048498 + 4.469e-9 * d,
            mean_anomaly: 19.8950 + 0.083_085_300_1 * d,
        },
        Body::Saturn => Orbit {
            node: 113.6634 + 2.38980e-5 * d,
            incl: 2.4886 - 1.081e-7 * d,
            peri: 339.3939 + 2.97661e-5 * d,
            axis: 9.55475,
            ecc: 0.055546 - 9.499e-9 * d,
            mean_anomaly: 316.9670 + 0.033_444_228_2 * d,
        },
        Body::Uranus => Orbit {
            node: 74.0005 + 1.3978e-5 * d,
            incl: 0.7733 + 1.9e-8 * d,
            peri: 96.6612 + 3.0565e-5 * d,
            axis: 19.18171 - 1.55e-8 * d,
            ecc: 0.047318 + 7.45e-9 * d,
            mean_anomaly: 142.5905 + 0.011_725_806 * d,
        },
        Body::Neptune => Orbit {
            node: 131.7806 + 3.0173e-5 * d,
            incl: 1.7700 - 2.55e-7 * d,
            peri: 272.8461 - 6.027e-6 * d,
            axis: 30.05826 + 3.313e-8 * d,
            ecc: 0.008606 + 2.15e-9 * d,
            mean_anomaly: 260.2471 + 0.005_995_147 * d,
        },
    }
}

/// Solves Kepler's equation `E - e sin E = M` (degrees in, degrees out).
fn eccentric_anomaly(mean_anomaly: f64, ecc: f64) -> f64 {
    let m = normalize_deg(mean_anomaly).to_radians();
    let mut e_anom = m + ecc * m.sin() * (1.0 + ecc * m.cos());
    for _ in 0..10 {
        let delta = (e_anom - ecc * e_anom.sin() - m) / (1.0 - ecc * e_anom.cos());
        e_anom -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    e_anom.to_degrees()
}

impl Orbit {
    /// Position in the orbit's own frame: true anomaly and radius vector.
    fn anomaly_and_radius(&self) -> (f64, f64) {
        let e_anom = eccentric_anomaly(self.mean_anomaly, self.ecc);
        let xv = self.axis * (cos_deg(e_anom) - self.ecc);
        let yv = self.axis * (1.0 - self.ecc * self.ecc).sqrt() * sin_deg(e_anom);
        (atan2_deg(yv, xv), xv.hypot(yv))
    }

    /// Rectangular ecliptic coordinates around the central body.
    fn ecliptic(&self) -> Ecliptic {
        let (v, r) = self.anomaly_and_radius();
        let arg = v + self.peri;
        let (sn, cn) = (sin_deg(self.node), cos_deg(self.node));
        let (sa, ca) = (sin_deg(arg), cos_deg(arg));
        let ci = cos_deg(self.incl);
        let x = r * (cn * ca - sn * sa * ci);
        let y = r * (sn * ca + cn * sa * ci);
        let z = r * sa * sin_deg(self.incl);
        Ecliptic::from_rect(x, y, z)
    }
}

/// Geocentric ecliptic position of the Sun.
fn sun_ecliptic(d: f64) -> Ecliptic {
    let sun = orbit(Body::Sun, d);
    let (v, r) = sun.anomaly_and_radius();
    Ecliptic {
        lon: normalize_deg(v + sun.peri),
        lat: 0.0,
        r,
    }
}

/// Geocentric ecliptic position of the Moon, perturbed, in Earth radii.
fn moon_ecliptic(d: f64) -> Ecliptic {
    let moon = orbit(Body::Moon, d);
    let sun = orbit(Body::Sun, d);
    let mut pos = moon.ecliptic();

    let ms = sun.mean_anomaly;
    let mm = moon.mean_anomaly;
    let ls = sun.mean_anomaly + sun.peri;
    let lm = moon.mean_anomaly + moon.peri + moon.node;
    let elong = lm - ls;
    let f = lm - moon.node;

    pos.lon += -1.274 * sin_deg(mm - 2.0 * elong)
        + 0.658 * sin_deg(2.0 * elong)
        - 0.186 * sin_deg(ms)
        - 0.059 * sin_deg(2.0 * mm - 2.0 * elong)
        - 0.057 * sin_deg(mm - 2.0 * elong + ms)
        + 0.053 * sin_deg(mm + 2.0 * elong)
        + 0.046 * sin_deg(2.0 * elong - ms)
        + 0.041 * sin_deg(mm - ms)
        - 0.035 * sin_deg(elong)
        - 0.031 * sin_deg(mm + ms)
        - 0.015 * sin_deg(2.0 * f - 2.0 * elong)
        + 0.011 * sin_deg(mm - 4.0 * elong);
    pos.lat += -0.173 * sin_deg(f - 2.0 * elong)
        - 0.055 * sin_deg(mm - f - 2.0 * elong)
        - 0.046 * sin_deg(mm + f - 2.0 * elong)
        + 0.033 * sin_deg(f + 2.0 * elong)
        + 0.017 * sin_deg(2.0 * mm + f);
    pos.r += -0.58 * cos_deg(mm - 2.0 * elong) - 0.46 * cos_deg(2.0 * elong);
    pos.lon = normalize_deg(pos.lon);
    pos
}

/// Heliocentric ecliptic position of a planet, with the mutual
/// Jupiter/Saturn/Uranus perturbations applied.
fn planet_heliocentric(body: Body, d: f64) -> Ecliptic {
    let mut pos = orbit(body, d).ecliptic();
    let mj = orbit(Body::Jupiter, d).mean_anomaly;
    let ms = orbit(Body::Saturn, d).mean_anomaly;
    let mu = orbit(Body::Uranus, d).mean_anomaly;

    match body {
        Body::Jupiter => {
            pos.lon += -0.332 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.056 * sin_deg(2.0 * mj - 2.0 * ms + 21.0)
                + 0.042 * sin_deg(3.0 * mj - 5.0 * ms + 21.0)
                - 0.036 * sin_deg(mj - 2.0 * ms)
                + 0.022 * cos_deg(mj - ms)
                + 0.023 * sin_deg(2.0 * mj - 3.0 * ms + 52.0)
                - 0.016 * sin_deg(mj - 5.0 * ms - 69.0);
        }
        Body::Saturn => {
            pos.lon += 0.812 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.229 * cos_deg(2.0 * mj - 4.0 * ms - 2.0)
                + 0.119 * sin_deg(mj - 2.0 * ms - 3.0)
                + 0.046 * sin_deg(2.0 * mj - 6.0 * ms - 69.0)
                + 0.014 * sin_deg(mj - 3.0 * ms + 32.0);
            pos.lat += -0.020 * cos_deg(2.0 * mj - 4.0 * ms - 2.0)
                + 0.018 * sin_deg(2.0 * mj - 6.0 * ms - 49.0);
        }
        Body::Uranus => {
            pos.lon += 0.040 * sin_deg(ms - 2.0 * mu + 6.0)
                + 0.035 * sin_deg(ms - 3.0 * mu + 33.0)
                - 0.015 * sin_deg(mj - mu + 20.0);
        }
        _ => {}
    }
    pos
}

/// Geocentric ecliptic position of any supported body.
fn geocentric_ecliptic(body: Body, d: f64) -> Ecliptic {
    match body {
        Body::Sun => sun_ecliptic(d),
        Body::Moon => moon_ecliptic(d),
        planet => {
            let (xh, yh, zh) = planet_heliocentric(planet, d).to_rect();
            let (xs, ys, _) = sun_ecliptic(d).to_rect();
            Ecliptic::from_rect(xh + xs, yh + ys, zh)
        }
    }
}

/// Computes the geocentric equatorial position of `body` at day number `d`.
#[must_use]
pub fn equatorial(body: Body, d: f64) -> Equatorial {
    let (x, y, z) = geocentric_ecliptic(body, d).to_rect();
    let ecl = obliquity(d);
    let ye = y * cos_deg(ecl) - z * sin_deg(ecl);
    let ze = y * sin_deg(ecl) + z * cos_deg(ecl);
    Equatorial {
        ra_deg: normalize_deg(atan2_deg(ye, x)),
        dec_deg: atan2_deg(ze, x.hypot(ye)),
        distance: (x * x + ye * ye + ze * ze).sqrt(),
    }
}

/// Angular separation between two equatorial positions, in degrees.
#[must_use]
pub fn separation_deg(a: &Equatorial, b: &Equatorial) -> f64 {
    let cos_sep = sin_deg(a.dec_deg) * sin_deg(b.dec_deg)
        + cos_deg(a.dec_deg) * cos_deg(b.dec_deg) * cos_deg(a.ra_deg - b.ra_deg);
    cos_sep.clamp(-1.0, 1.0).acos().to_degrees()
}
