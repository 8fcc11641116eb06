use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, instrument};

use crate::model::{Condition, WeatherQuery, WeatherReading, mps_to_kmh, round_celsius};

use super::{FetchError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// The `cod` value OpenWeather embeds in a successful payload.
/// `cod` compares numerically, so `200` and `200.0` both count.
const SUCCESS_CODE: f64 = 200.0;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"****")
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, query), fields(city = %query))]
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherReading, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("units", "metric"),
                ("q", query.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "received OpenWeather response");

        parse_current(&body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_reading(self) -> Result<WeatherReading, FetchError> {
        let condition = self
            .weather
            .first()
            .map(|w| Condition::from_provider(&w.main))
            .ok_or_else(|| FetchError::InvalidPayload("`weather` array is empty".into()))?;

        if self.main.humidity > 100 {
            return Err(FetchError::InvalidPayload(format!(
                "humidity out of range: {}",
                self.main.humidity
            )));
        }

        Ok(WeatherReading {
            city_name: self.name,
            temperature_celsius: round_celsius(self.main.temp),
            humidity_percent: self.main.humidity,
            wind_speed_kmh: mps_to_kmh(self.wind.speed),
            condition,
            observed_at: self.dt.and_then(unix_to_utc),
        })
    }
}

/// Classify a current-weather body. Only an integer `cod` of 200 counts as success.
fn parse_current(body: &str) -> Result<WeatherReading, FetchError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        FetchError::InvalidPayload(format!("{e}; body: {}", truncate_body(body)))
    })?;

    match value.get("cod") {
        Some(cod) if cod.as_f64() == Some(SUCCESS_CODE) => {}
        Some(cod) => return Err(FetchError::NotFound { code: cod.to_string() }),
        None => return Err(FetchError::NotFound { code: "missing".into() }),
    }

    let parsed: OwCurrentResponse =
        serde_json::from_value(value).map_err(|e| FetchError::InvalidPayload(e.to_string()))?;

    parsed.into_reading()
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
