use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest city name the search form accepts.
pub const MAX_CITY_CHARS: usize = 50;

/// A validated, non-empty city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery(String);

impl WeatherQuery {
    /// Trim the raw input and reject it if nothing is left.
    ///
    /// Input longer than [`MAX_CITY_CHARS`] is cut down to that many characters.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let city = match trimmed.char_indices().nth(MAX_CITY_CHARS) {
            Some((idx, _)) => trimmed[..idx].trim_end(),
            None => trimmed,
        };

        if city.is_empty() { None } else { Some(Self(city.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse weather classification reported by the provider (`weather[0].main`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Mist,
    Snow,
    Thunderstorm,
    Haze,
    Fog,
    Other(String),
}

impl Condition {
    pub const KNOWN: [Condition; 9] = [
        Condition::Clear,
        Condition::Clouds,
        Condition::Rain,
        Condition::Drizzle,
        Condition::Mist,
        Condition::Snow,
        Condition::Thunderstorm,
        Condition::Haze,
        Condition::Fog,
    ];

    pub fn from_provider(main: &str) -> Self {
        match main {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Drizzle" => Condition::Drizzle,
            "Mist" => Condition::Mist,
            "Snow" => Condition::Snow,
            "Thunderstorm" => Condition::Thunderstorm,
            "Haze" => Condition::Haze,
            "Fog" => Condition::Fog,
            other => Condition::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Rain => "Rain",
            Condition::Drizzle => "Drizzle",
            Condition::Mist => "Mist",
            Condition::Snow => "Snow",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Haze => "Haze",
            Condition::Fog => "Fog",
            Condition::Other(s) => s,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition::from_provider(&value)
    }
}

impl From<Condition> for String {
    fn from(value: Condition) -> Self {
        value.as_str().to_string()
    }
}

/// Current conditions for one city, already converted to display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    /// Name as resolved by the provider, which may differ from the query.
    pub city_name: String,
    pub temperature_celsius: i32,
    pub humidity_percent: u8,
    /// One decimal place.
    pub wind_speed_kmh: f64,
    pub condition: Condition,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Result of one submitted query. Exactly one variant per submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum QueryOutcome {
    Success(WeatherReading),
    NotFound,
    NetworkError,
    OtherError(String),
    EmptyInput,
}

/// Round a metric temperature to whole degrees, half to even.
pub fn round_celsius(temp: f64) -> i32 {
    temp.round_ties_even() as i32
}

/// Convert m/s to km/h, rounded to one decimal place, half to even.
///
/// Rounding looks at the exact binary value of the product, so a product
/// stored just below a tie (3.15 is 3.1499..) rounds down.
pub fn mps_to_kmh(speed: f64) -> f64 {
    let kmh = speed * 3.6;
    format!("{kmh:.1}").parse().unwrap_or(kmh)
}
