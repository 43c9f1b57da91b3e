//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid target: target must be a non-empty string",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`GatewayError`] code ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2999 | State      | 409 Conflict              |
/// | 3000–3999 | Server     | 500 / 502                 |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Pointing target is missing or blank.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// Target does not name a body the tracker can follow.
    #[error("unknown body: {0}")]
    UnknownBody(String),

    /// A meteorological reading is not a finite number.
    #[error("{field} must be a real number or null")]
    InvalidMeasurement {
        /// Name of the offending reading (`temperature`, `pressure`, `humidity`).
        field: &'static str,
    },

    /// Observing site coordinates out of range.
    #[error("invalid site: {0}")]
    InvalidSite(String),

    /// Operation not allowed in the current pointing status.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Alt/az computation failed.
    #[error("tracking error: {0}")]
    Tracking(String),

    /// Weather API failure.
    #[error("meteo error: {0}")]
    Meteo(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidTarget(_) => 1002,
            Self::UnknownBody(_) => 1003,
            Self::InvalidMeasurement { .. } => 1004,
            Self::InvalidSite(_) => 1005,
            Self::InvalidState(_) => 2001,
            Self::Tracking(_) => 3001,
            Self::Meteo(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidTarget(_)
            | Self::UnknownBody(_)
            | Self::InvalidMeasurement { .. }
            | Self::InvalidSite(_) => StatusCode::BAD_REQUEST,
            Self::InvalidState(_) => StatusCode::CONFLICT,
            Self::Tracking(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Meteo(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Meteo(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
