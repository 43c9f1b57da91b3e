//! pointing-monitor: terminal view of a running gateway.
//!
//! Connects to the push channel, drives the dashboard status renderer
//! over an in-memory element tree and prints the rendered panel after
//! every frame that changes it.

use anyhow::Context;
use futures_util::StreamExt;
use tokio_tungstenite::tungstenite::Message;
use tracing_subscriber::EnvFilter;

use pointing_gateway::config::MonitorConfig;
use pointing_gateway::dashboard::{DisplayMode, MemoryDom, StatusRenderer, ids};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = MonitorConfig::from_env();
    let dom = MemoryDom::dashboard();
    let mut renderer = StatusRenderer::bind(&dom)?;

    let (stream, _) = tokio_tungstenite::connect_async(config.url.as_str())
        .await
        .with_context(|| format!("connecting to {}", config.url))?;
    tracing::info!(url = %config.url, "push channel open");

    let (_, mut incoming) = stream.split();
    let mut last_line = String::new();

    while let Some(message) = incoming.next().await {
        let text = match message.context("reading push frame")? {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        if let Err(err) = renderer.handle_frame(text.as_str()) {
            tracing::warn!(error = %err, "skipping frame");
            continue;
        }
        let Some(line) = render_line(&dom) else {
            continue;
        };
        if line != last_line {
            println!("{line}");
            last_line = line;
        }
    }

    tracing::info!("push channel closed");
    Ok(())
}

/// One-line summary of the panel; `None` until a status has arrived.
fn render_line(dom: &MemoryDom) -> Option<String> {
    let text = |id: &str| dom.text_of(id).unwrap_or_default();
    let status = text(ids::STATUS_TEXT);
    if status.is_empty() {
        return None;
    }
    let line = if dom.display_of(ids::CONTENT_PANEL) == Some(DisplayMode::Flex) {
        format!(
            "[{status}] {} | {} | {}",
            text(ids::TARGET),
            text(ids::ALTITUDE),
            text(ids::AZIMUTH)
        )
    } else {
        format!("[{status}]")
    };
    Some(line)
}
