//! Cached met.no client.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use utoipa::ToSchema;

use super::forecast::Forecast;
use crate::astro::Site;
use crate::config::MeteoConfig;
use crate::domain::Meteorological;
use crate::error::GatewayError;

/// Conditions used when the weather API cannot be reached.
pub const FALLBACK_CONDITIONS: Meteorological = Meteorological {
    temperature: Some(15.0),
    pressure: Some(1013.25),
    humidity: Some(0.5),
};

/// Where a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MeteoSource {
    /// Live met.no forecast.
    Forecast,
    /// Built-in standard atmosphere after a failed request.
    Fallback,
}

/// A weather reading as served by `GET /api/v1/meteo`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct MeteoReading {
    /// The conditions themselves.
    pub conditions: Meteorological,
    /// Whether they are live or fallback values.
    pub source: MeteoSource,
    /// When the reading was taken.
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct CachedReading {
    stored_at: Instant,
    reading: MeteoReading,
}

/// met.no client with a single-entry TTL cache.
///
/// Every reading is cached for `ttl`, fallbacks included, so an API
/// outage costs at most one failed request per TTL window.
#[derive(Debug)]
pub struct MeteoClient {
    http: reqwest::Client,
    config: MeteoConfig,
    site: Site,
    cache: Mutex<Option<CachedReading>>,
}

impl MeteoClient {
    /// Creates a client for the given site.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Meteo`] if the HTTP client cannot be built.
    pub fn new(config: MeteoConfig, site: Site) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            config,
            site,
            cache: Mutex::new(None),
        })
    }

    /// Whether the service should consult this client at all.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Fetches the forecast and returns the conditions closest to now,
    /// bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Meteo`] on transport errors, non-success
    /// status codes, undecodable bodies, or an empty timeseries.
    pub async fn fetch(&self) -> Result<Meteorological, GatewayError> {
        // met.no rejects coordinates with more than four decimals
        let url = format!(
            "{}?lat={:.4}&lon={:.4}",
            self.config.url, self.site.latitude_deg, self.site.longitude_deg
        );
        let forecast: Forecast = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        forecast.conditions_at(Utc::now())
    }

    /// Returns the current conditions, served from cache when fresh.
    ///
    /// Never fails: errors are logged and replaced by
    /// [`FALLBACK_CONDITIONS`].
    pub async fn current(&self) -> MeteoReading {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = *cache
            && cached.stored_at.elapsed() < self.config.ttl
        {
            return cached.reading;
        }

        let reading = match self.fetch().await {
            Ok(conditions) => MeteoReading {
                conditions,
                source: MeteoSource::Forecast,
                fetched_at: Utc::now(),
            },
            Err(err) => {
                tracing::warn!(error = %err, "weather API unavailable, using fallback");
                MeteoReading {
                    conditions: FALLBACK_CONDITIONS,
                    source: MeteoSource::Fallback,
                    fetched_at: Utc::now(),
                }
            }
        };
        tracing::debug!(source = ?reading.source, "weather reading refreshed");
        *cache = Some(CachedReading {
            stored_at: Instant::now(),
            reading,
        });
        reading
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use axum::Router;
    use axum::routing::get;

    use super::*;

    const BODY: &str = r#"{"properties": {"timeseries": [
        {"time": "2025-06-01T12:00:00Z", "data": {"instant": {"details": {
            "air_pressure_at_sea_level": 1008.0, "air_temperature": 21.5, "relative_humidity": 40.0}}}}
    ]}}"#;

    fn config(url: String, ttl: Duration) -> MeteoConfig {
        MeteoConfig {
            enabled: true,
            url,
            user_agent: "pointing-gateway-tests/0".to_string(),
            timeout: Duration::from_secs(2),
            ttl,
        }
    }

    async fn serve_forecast() -> String {
        let app = Router::new().route("/compact", get(|| async { BODY }));
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/compact")
    }

    #[tokio::test]
    async fn reads_live_forecast() {
        let url = serve_forecast().await;
        let Ok(client) = MeteoClient::new(config(url, Duration::from_secs(60)), Site::default())
        else {
            panic!("client build failed");
        };
        let reading = client.current().await;
        assert_eq!(reading.source, MeteoSource::Forecast);
        assert_eq!(reading.conditions.temperature, Some(21.5));
        assert_eq!(reading.conditions.pressure, Some(1008.0));
        assert_eq!(reading.conditions.humidity, Some(0.4));
    }

    #[tokio::test]
    async fn falls_back_when_unreachable() {
        let url = "http://127.0.0.1:9/compact".to_string();
        let Ok(client) = MeteoClient::new(config(url, Duration::from_secs(60)), Site::default())
        else {
            panic!("client build failed");
        };
        assert!(client.fetch().await.is_err());
        let reading = client.current().await;
        assert_eq!(reading.source, MeteoSource::Fallback);
        assert_eq!(reading.conditions, FALLBACK_CONDITIONS);
    }

    #[tokio::test]
    async fn caches_within_ttl() {
        let url = "http://127.0.0.1:9/compact".to_string();
        let Ok(client) = MeteoClient::new(config(url, Duration::from_secs(600)), Site::default())
        else {
            panic!("client build failed");
        };
        let first = client.current().await;
        let second = client.current().await;
        assert_eq!(first.fetched_at, second.fetched_at);
    }

    #[tokio::test]
    async fn refreshes_after_ttl() {
        let url = "http://127.0.0.1:9/compact".to_string();
        let Ok(client) = MeteoClient::new(config(url, Duration::ZERO), Site::default()) else {
            panic!("client build failed");
        };
        let first = client.current().await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = client.current().await;
        assert!(second.fetched_at > first.fetched_at);
    }
}
