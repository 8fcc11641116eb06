use crate::{
    Config,
    model::{QueryOutcome, WeatherQuery, WeatherReading},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Message shown for any failure that is neither "not found" nor a transport problem.
pub const GENERIC_ERROR_MESSAGE: &str = "Error fetching weather data";

/// Why a provider call did not produce a reading.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider's status code said anything other than success.
    #[error("Provider reported status {code}")]
    NotFound { code: String },

    /// DNS, connect, timeout or body transfer failure.
    #[error("Network failure: {0}")]
    Network(String),

    /// The response could not be read as the expected payload.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The HTTP client itself misbehaved (e.g. a bad base URL).
    #[error("HTTP client error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        let err = err.without_url();
        if err.is_builder() {
            FetchError::Http(err.to_string())
        } else if err.is_decode() {
            FetchError::InvalidPayload(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherReading, FetchError>;
}

/// Ask the provider once and classify the result.
pub async fn fetch(provider: &dyn WeatherProvider, query: &WeatherQuery) -> QueryOutcome {
    match provider.current_weather(query).await {
        Ok(reading) => QueryOutcome::Success(reading),
        Err(err) => {
            tracing::warn!(city = %query, error = %err, "weather lookup failed");
            match err {
                FetchError::NotFound { .. } => QueryOutcome::NotFound,
                FetchError::Network(_) => QueryOutcome::NetworkError,
                FetchError::InvalidPayload(_) | FetchError::Http(_) => {
                    QueryOutcome::OtherError(GENERIC_ERROR_MESSAGE.to_string())
                }
            }
        }
    }
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weather-card configure` or set WEATHER_CARD_API_KEY."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::with_base_url(api_key.to_owned(), config.base_url.clone())))
}
