//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every key has a default so the
//! gateway starts with no configuration at all.

use std::net::SocketAddr;
use std::time::Duration;

use crate::astro::Site;

/// Default met.no compact forecast endpoint.
pub const DEFAULT_METEO_URL: &str = "https://api.met.no/weatherapi/locationforecast/2.0/compact";

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Observing site used for every alt/az computation.
    pub site: Site,

    /// Period of the tracking loop.
    pub track_interval: Duration,

    /// Number of decimal places alt/az are rounded to before publishing.
    pub coord_decimals: u32,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,

    /// Weather client settings.
    pub meteo: MeteoConfig,
}

/// Settings for the met.no weather client.
#[derive(Debug, Clone)]
pub struct MeteoConfig {
    /// Whether missing conditions are filled from the weather API.
    pub enabled: bool,

    /// Forecast endpoint, queried with `lat` and `lon` parameters.
    pub url: String,

    /// `User-Agent` header; met.no rejects anonymous clients.
    pub user_agent: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// How long a reading (or fallback) is reused.
    pub ttl: Duration,
}

impl Default for MeteoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_METEO_URL.to_string(),
            user_agent: concat!("pointing-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(5),
            ttl: Duration::from_secs(600),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            site: Site::default(),
            track_interval: Duration::from_secs(1),
            coord_decimals: 4,
            event_bus_capacity: 1024,
            request_timeout: Duration::from_secs(30),
            meteo: MeteoConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`], or if the site coordinates are out of range.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let default_site = Site::default();
        let site = Site::new(
            parse_env("SITE_LAT", default_site.latitude_deg),
            parse_env("SITE_LON", default_site.longitude_deg),
            parse_env("SITE_HEIGHT_M", default_site.height_m),
        )?;

        let track_interval = Duration::from_millis(parse_env("TRACK_INTERVAL_MS", 1000_u64).max(1));
        let coord_decimals = parse_env("COORD_DECIMALS", 4_u32).min(12);
        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 1024_usize).max(1);
        let request_timeout = Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30));

        let defaults = MeteoConfig::default();
        let meteo = MeteoConfig {
            enabled: parse_env_bool("METEO_ENABLED", defaults.enabled),
            url: std::env::var("METEO_URL").unwrap_or(defaults.url),
            user_agent: std::env::var("METEO_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout: Duration::from_secs(parse_env("METEO_TIMEOUT_SECS", 5)),
            ttl: Duration::from_secs(parse_env("METEO_TTL_SECS", 600)),
        };

        Ok(Self {
            listen_addr,
            site,
            track_interval,
            coord_decimals,
            event_bus_capacity,
            request_timeout,
            meteo,
        })
    }
}

/// Settings for the `pointing-monitor` binary.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Push channel endpoint of a running gateway.
    pub url: String,
}

impl MonitorConfig {
    /// Loads the monitor configuration from `MONITOR_URL`, defaulting to a
    /// gateway on localhost.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            url: std::env::var("MONITOR_URL")
                .unwrap_or_else(|_| "ws://127.0.0.1:3000/ws".to_string()),
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        let value: u64 = parse_env("POINTING_GATEWAY_TEST_UNSET_KEY", 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn parse_env_bool_falls_back_on_missing_key() {
        assert!(parse_env_bool("POINTING_GATEWAY_TEST_UNSET_BOOL", true));
        assert!(!parse_env_bool("POINTING_GATEWAY_TEST_UNSET_BOOL", false));
    }

    #[test]
    fn meteo_defaults_point_at_met_no() {
        let cfg = MeteoConfig::default();
        assert!(cfg.enabled);
        assert_eq!(cfg.url, DEFAULT_METEO_URL);
        assert_eq!(cfg.ttl, Duration::from_secs(600));
        assert!(cfg.user_agent.starts_with("pointing-gateway/"));
    }
}
