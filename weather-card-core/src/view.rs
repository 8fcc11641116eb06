//! Turns a [`QueryOutcome`] into the labels and icon shown on the card.

use serde::{Deserialize, Serialize};

use crate::{
    icons::{IconAsset, IconKey},
    model::{QueryOutcome, WeatherReading},
};

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a city name";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";
pub const HEADLINE_PLACEHOLDER: &str = "--";

const TEMPERATURE_PLACEHOLDER: &str = "--°C";
const HUMIDITY_PLACEHOLDER: &str = "--%";
const WIND_PLACEHOLDER: &str = "-- km/h";

/// Display-ready card contents for one query outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub headline: String,
    pub icon: IconKey,
    pub temperature_label: String,
    pub humidity_label: String,
    pub wind_label: String,
    /// Condition text as the provider reported it, present only with a reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl ViewModel {
    fn placeholder(headline: &str, icon: IconKey) -> Self {
        Self {
            headline: headline.to_string(),
            icon,
            temperature_label: TEMPERATURE_PLACEHOLDER.to_string(),
            humidity_label: HUMIDITY_PLACEHOLDER.to_string(),
            wind_label: WIND_PLACEHOLDER.to_string(),
            condition: None,
        }
    }

    fn from_reading(reading: &WeatherReading, icons: &IconAsset) -> Self {
        Self {
            headline: reading.city_name.clone(),
            icon: icons.lookup(&reading.condition),
            temperature_label: format!("{}°C", reading.temperature_celsius),
            humidity_label: format!("{}%", reading.humidity_percent),
            wind_label: format!("{:.1} km/h", reading.wind_speed_kmh),
            condition: Some(reading.condition.as_str().to_string()),
        }
    }

    /// True when the numeric labels carry real values.
    pub fn has_reading(&self) -> bool {
        self.temperature_label != TEMPERATURE_PLACEHOLDER
    }
}

pub fn to_view_model(outcome: &QueryOutcome, icons: &IconAsset) -> ViewModel {
    match outcome {
        QueryOutcome::EmptyInput => ViewModel::placeholder(EMPTY_INPUT_MESSAGE, IconKey::Error),
        QueryOutcome::NotFound => ViewModel::placeholder(HEADLINE_PLACEHOLDER, IconKey::NotFound),
        QueryOutcome::NetworkError => {
            ViewModel::placeholder(NETWORK_ERROR_MESSAGE, IconKey::Error)
        }
        QueryOutcome::OtherError(message) => ViewModel::placeholder(message, IconKey::Error),
        QueryOutcome::Success(reading) => ViewModel::from_reading(reading, icons),
    }
}
