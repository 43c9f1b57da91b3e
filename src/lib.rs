//! # pointing-gateway
//!
//! Telescope pointing service with live alt/az tracking.
//!
//! An operator picks a solar-system body (optionally with the current
//! temperature, pressure and humidity); the gateway records the pointing
//! status, computes the body's altitude and azimuth for the observing
//! site once per tracking interval, and pushes every status change and
//! every new coordinate to connected dashboards over a WebSocket.
//! Missing atmospheric readings are filled from the met.no forecast API.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket, pointing-monitor)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Push Channel (ws/)
//!     │
//!     ├── PointingService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── StatusManager (domain/)
//!     ├── Tracker (astro/)
//!     │
//!     └── MeteoClient (meteo/) ── met.no
//! ```
//!
//! The [`dashboard`] module is the client half: it decodes push frames
//! and drives a status view and the pointing form toggle over an
//! abstract element tree.

pub mod api;
pub mod app_state;
pub mod astro;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod meteo;
pub mod server;
pub mod service;
pub mod ws;
