//! Weather conditions from the met.no forecast API.
//!
//! Temperature and pressure feed the refraction correction of the
//! tracker. Readings are cached and fall back to a standard atmosphere
//! when the API cannot be reached.

pub mod client;
pub mod forecast;

pub use client::{FALLBACK_CONDITIONS, MeteoClient, MeteoReading, MeteoSource};
