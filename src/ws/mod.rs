//! Push channel: one WebSocket per dashboard.
//!
//! The endpoint at `/ws` is server-to-client only. Each frame is a
//! [`PointingEvent`](crate::domain::PointingEvent) encoded as
//! `{"event": ..., "data": ...}`. Text sent by clients is ignored.

pub mod connection;
pub mod handler;
