//! Solar system bodies the tracker can follow.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::GatewayError;

/// A trackable solar system body.
///
/// Parsed case-insensitively from the pointing target name. The Earth is
/// deliberately absent: it is where the observer stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    /// The Sun.
    Sun,
    /// The Moon.
    Moon,
    /// Mercury.
    Mercury,
    /// Venus.
    Venus,
    /// Mars.
    Mars,
    /// Jupiter.
    Jupiter,
    /// Saturn.
    Saturn,
    /// Uranus.
    Uranus,
    /// Neptune.
    Neptune,
}

impl Body {
    /// Every supported body, nearest first.
    pub const ALL: [Self; 9] = [
        Self::Sun,
        Self::Moon,
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
    ];

    /// Returns the lowercase catalog name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Uranus => "uranus",
            Self::Neptune => "neptune",
        }
    }

    /// Returns `true` for bodies orbiting the Sun (everything but the Sun
    /// and the Moon).
    #[must_use]
    pub const fn is_planet(&self) -> bool {
        !matches!(self, Self::Sun | Self::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GatewayError::UnknownBody(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Mars".parse::<Body>().ok(), Some(Body::Mars));
        assert_eq!("  JUPITER ".parse::<Body>().ok(), Some(Body::Jupiter));
        assert_eq!("moon".parse::<Body>().ok(), Some(Body::Moon));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!(
            "pluto".parse::<Body>(),
            Err(GatewayError::UnknownBody(name)) if name == "pluto"
        ));
        assert!("earth".parse::<Body>().is_err());
    }

    #[test]
    fn names_round_trip_through_display() {
        for body in Body::ALL {
            assert_eq!(body.to_string().parse::<Body>().ok(), Some(body));
        }
    }

    #[test]
    fn planets_exclude_sun_and_moon() {
        let planets = Body::ALL.iter().filter(|b| b.is_planet()).count();
        assert_eq!(planets, 7);
    }
}
