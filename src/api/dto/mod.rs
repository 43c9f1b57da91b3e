//! Data Transfer Objects for REST request/response serialization.
//!
//! Status snapshots and weather readings are served as their domain
//! types directly; only request bodies and catalog entries live here.

pub mod pointing_dto;

pub use pointing_dto::*;
