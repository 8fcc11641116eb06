//! Core library for the `weather-card` app.
//!
//! This crate defines:
//! - Query validation and the weather reading model
//! - The OpenWeather provider and outcome classification
//! - The icon table and the card view model
//! - Configuration & credentials handling
//!
//! It is used by `weather-card-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod icons;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod view;

pub use config::Config;
pub use icons::{IconAsset, IconKey, icons};
pub use model::{Condition, QueryOutcome, WeatherQuery, WeatherReading};
pub use pipeline::WeatherCard;
pub use provider::{FetchError, WeatherProvider, fetch, openweather::OpenWeatherProvider};
pub use view::{ViewModel, to_view_model};
