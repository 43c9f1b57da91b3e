//! Positional astronomy: where a solar system body stands in the sky.
//!
//! ```text
//! Body ──► ephemeris (geocentric RA/Dec of date)
//!              │
//!              ▼
//!          Site (sidereal time, hour angle) ──► Tracker (parallax, refraction)
//! ```

pub mod angles;
pub mod body;
pub mod ephemeris;
pub mod site;
pub mod tracker;

pub use body::Body;
pub use site::Site;
pub use tracker::Tracker;
