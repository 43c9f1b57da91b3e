//! pointing-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use tracing_subscriber::EnvFilter;

use pointing_gateway::config::GatewayConfig;
use pointing_gateway::server::{build_app, build_state};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        lat = config.site.latitude_deg,
        lon = config.site.longitude_deg,
        meteo = config.meteo.enabled,
        "starting pointing-gateway"
    );

    // Build domain, service and HTTP layers
    let state = build_state(&config)?;
    let pointing_service = std::sync::Arc::clone(&state.pointing_service);
    let app = build_app(state, config.request_timeout);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested");
        })
        .await?;

    pointing_service.idle().await;
    Ok(())
}
