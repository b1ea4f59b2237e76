//! Environment configuration for hearth: `.env` loading plus typed [`Settings`].
//!
//! Priority: **existing process environment wins over `.env`**. A missing
//! required credential is fatal at startup ([`ConfigError::MissingVar`]); a
//! malformed TTL degrades to the 30-minute default with a logged warning and
//! never crashes the process.

mod dotenv;

use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default cache TTL, used when a TTL variable is unset or malformed.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Default OpenWeatherMap endpoint.
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org";

/// Default Google Calendar v3 endpoint.
pub const DEFAULT_CALENDAR_URL: &str = "https://www.googleapis.com/calendar/v3";

const DEFAULT_SUBSCRIBE_QUEUE_CAPACITY: usize = 32;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Weather upstream credentials and cache TTL.
#[derive(Clone, Debug)]
pub struct WeatherSettings {
    pub api_key: String,
    pub city_id: String,
    pub base_url: String,
    pub ttl: Duration,
}

/// Calendar upstream credentials and cache TTL.
#[derive(Clone, Debug)]
pub struct CalendarSettings {
    pub api_key: String,
    pub calendar_id: String,
    pub base_url: String,
    pub ttl: Duration,
}

/// Everything the server needs, read once at startup.
#[derive(Clone, Debug)]
pub struct Settings {
    pub weather: WeatherSettings,
    pub calendar: CalendarSettings,
    pub bind_addr: String,
    /// Capacity of each subscriber's delivery queue on the display stream.
    pub subscribe_queue_capacity: usize,
    /// When false, background refreshers are not spawned (caches still refresh
    /// on request). Set by the `--no-refresh` CLI flag.
    pub refresh: bool,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// Required: `WEATHER_API_KEY`, `WEATHER_CITY_ID`, `CALENDAR_API_KEY`,
    /// `CALENDAR_ID`. Optional with defaults: `WEATHER_URL`, `CALENDAR_URL`,
    /// `WEATHER_CACHE_TTL`, `CALENDAR_TTL` (duration strings like `30m`),
    /// `BIND_ADDR`, `SUBSCRIBE_QUEUE_CAPACITY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            weather: WeatherSettings {
                api_key: require("WEATHER_API_KEY")?,
                city_id: require("WEATHER_CITY_ID")?,
                base_url: var_or("WEATHER_URL", DEFAULT_WEATHER_URL),
                ttl: ttl_var("WEATHER_CACHE_TTL"),
            },
            calendar: CalendarSettings {
                api_key: require("CALENDAR_API_KEY")?,
                calendar_id: require("CALENDAR_ID")?,
                base_url: var_or("CALENDAR_URL", DEFAULT_CALENDAR_URL),
                ttl: ttl_var("CALENDAR_TTL"),
            },
            bind_addr: var_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            subscribe_queue_capacity: std::env::var("SUBSCRIBE_QUEUE_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SUBSCRIBE_QUEUE_CAPACITY),
            refresh: true,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parses a TTL variable like `30m` or `90s`. Unset or malformed values fall
/// back to [`DEFAULT_TTL`]; malformed values are logged.
fn ttl_var(name: &str) -> Duration {
    let Ok(raw) = std::env::var(name) else {
        return DEFAULT_TTL;
    };
    match humantime::parse_duration(&raw) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!("{name}={raw} is not a valid duration ({e}), using default 30m");
            DEFAULT_TTL
        }
    }
}

/// Loads `.env` from `override_dir` (or the current directory) and sets each
/// key that is **not** already present in the process environment.
pub fn load_and_apply(override_dir: Option<&Path>) -> Result<(), ConfigError> {
    let map = dotenv::load_env_map(override_dir).map_err(ConfigError::DotenvRead)?;
    for (key, value) in map {
        if std::env::var(&key).is_err() {
            std::env::set_var(&key, value);
        }
    }
    Ok(())
}
