//! Weather upstream client, OpenWeatherMap wire shape.
//!
//! This is the boundary: endpoint, query parameters, and payload shape live
//! here and nowhere else. The server never calls this directly; it sits behind
//! a [`crate::cache::Cache`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cache::Fetch;
use crate::error::FetchError;
use crate::http;

/// Weather upstream client: current conditions for one configured city.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    city_id: String,
    api_key: String,
}

impl Client {
    pub fn new(
        base_url: impl Into<String>,
        city_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_client(http::client(), base_url, city_id, api_key)
    }

    /// Same, with a caller-supplied `reqwest::Client` (custom timeouts,
    /// proxies).
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        city_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            city_id: city_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetches the current conditions for the configured city.
    pub async fn current(&self) -> Result<Weather, FetchError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("id", self.city_id.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;
        FetchError::check_status(response.status())?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Fetch for Client {
    type Value = Weather;

    async fn fetch(&self) -> Result<Weather, FetchError> {
        self.current().await
    }
}

/// Current-conditions snapshot. Every field defaults, so partial upstream
/// payloads still decode; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Weather {
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub base: String,
    pub main: Readings,
    pub visibility: i64,
    pub wind: Wind,
    pub clouds: Clouds,
    pub dt: i64,
    pub sys: Sys,
    pub timezone: i64,
    pub id: i64,
    pub name: String,
    pub cod: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

/// One entry of the upstream's condition list ("Rain", "light rain", icon id).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Readings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
    pub deg: i64,
    pub gust: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    pub all: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sys {
    #[serde(rename = "type")]
    pub kind: i64,
    pub id: i64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}
