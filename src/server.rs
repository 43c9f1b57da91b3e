//! Wiring: builds the application state and the Axum router from a
//! [`GatewayConfig`].

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::astro::Tracker;
use crate::config::GatewayConfig;
use crate::domain::EventBus;
use crate::error::GatewayError;
use crate::meteo::MeteoClient;
use crate::service::{PointingService, TrackingSettings};
use crate::ws::handler::ws_handler;

/// Builds the domain and service layers.
///
/// The weather client is only created when enabled in the configuration.
///
/// # Errors
///
/// Returns [`GatewayError::Meteo`] if the weather HTTP client cannot be
/// built.
pub fn build_state(config: &GatewayConfig) -> Result<AppState, GatewayError> {
    let event_bus = EventBus::new(config.event_bus_capacity);
    let meteo = if config.meteo.enabled {
        Some(Arc::new(MeteoClient::new(config.meteo.clone(), config.site)?))
    } else {
        None
    };
    let settings = TrackingSettings {
        interval: config.track_interval,
        coord_decimals: config.coord_decimals,
    };
    let pointing_service = Arc::new(PointingService::new(
        Tracker::new(config.site),
        event_bus.clone(),
        meteo,
        settings,
    ));

    Ok(AppState {
        pointing_service,
        event_bus,
    })
}

/// Builds the full router: REST endpoints, the `/ws` push channel and the
/// HTTP middleware stack.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(request_timeout_layer(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Answers `408 Request Timeout` when a request outlives `timeout`.
fn request_timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::config::MeteoConfig;
    use crate::domain::{AppStatus, StatusSnapshot};

    fn app() -> Router {
        let config = GatewayConfig {
            track_interval: Duration::from_millis(20),
            meteo: MeteoConfig {
                enabled: false,
                ..MeteoConfig::default()
            },
            ..GatewayConfig::default()
        };
        let Ok(state) = build_state(&config) else {
            panic!("state build failed");
        };
        build_app(state, config.request_timeout)
    }

    async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let Ok(request) = builder.body(Body::from(body.unwrap_or_default().to_string())) else {
            panic!("request build failed");
        };
        let Ok(response) = app.clone().oneshot(request).await else {
            panic!("router failed");
        };
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app();
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn status_starts_idle() {
        let app = app();
        let (status, body) = call(&app, "GET", "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "IDLE");
        assert!(body["target"].is_null());
        assert_eq!(body["established"], false);
    }

    #[tokio::test]
    async fn point_establish_stop_cycle() {
        let app = app();
        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/pointing",
            Some(r#"{"obj": "mars", "temperature": 10.0, "pressure": 1000.0, "humidity": 0.6}"#),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let Ok(snapshot) = serde_json::from_value::<StatusSnapshot>(body) else {
            panic!("not a status snapshot");
        };
        assert_eq!(snapshot.status, AppStatus::Pointing);
        assert_eq!(snapshot.target.as_deref(), Some("mars"));
        assert_eq!(snapshot.meteorological.temperature, Some(10.0));

        let (status, body) = call(&app, "POST", "/api/v1/pointing/establish", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["established"], true);

        let (status, body) = call(&app, "POST", "/api/v1/pointing/stop", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "IDLE");

        let (_, body) = call(&app, "GET", "/status", None).await;
        assert_eq!(body["status"], "IDLE");
    }

    #[tokio::test]
    async fn unknown_body_is_bad_request() {
        let app = app();
        let (status, body) =
            call(&app, "POST", "/api/v1/pointing", Some(r#"{"obj": "pluto"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1003);
    }

    #[tokio::test]
    async fn blank_target_is_bad_request() {
        let app = app();
        let (status, body) = call(&app, "POST", "/api/v1/pointing", Some(r#"{"obj": "  "}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1002);
    }

    #[tokio::test]
    async fn undecodable_body_is_bad_request() {
        let app = app();
        let (status, body) = call(&app, "POST", "/api/v1/pointing", Some(r#"{"obj": 42}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);
    }

    #[tokio::test]
    async fn establish_while_idle_conflicts() {
        let app = app();
        let (status, body) = call(&app, "POST", "/api/v1/pointing/establish", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], 2001);
    }

    #[tokio::test]
    async fn meteo_disabled_conflicts() {
        let app = app();
        let (status, _) = call(&app, "GET", "/api/v1/meteo", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn bodies_lists_catalog() {
        let app = app();
        let (status, body) = call(&app, "GET", "/api/v1/bodies", None).await;
        assert_eq!(status, StatusCode::OK);
        let Some(bodies) = body.as_array() else {
            panic!("expected an array");
        };
        assert_eq!(bodies.len(), 9);
        assert_eq!(body[0]["name"], "sun");
        assert_eq!(body[0]["kind"], "star");
    }

    #[tokio::test]
    async fn slow_requests_time_out() {
        let slow = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(request_timeout_layer(Duration::from_millis(20)));
        let Ok(request) = Request::builder().uri("/slow").body(Body::empty()) else {
            panic!("request build failed");
        };
        let Ok(response) = slow.oneshot(request).await else {
            panic!("router failed");
        };
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
