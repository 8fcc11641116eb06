use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use crate::model::Condition;

/// Identifier of an image (or glyph) shown on the weather card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKey {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Mist,
    Snow,
    Thunderstorm,
    Haze,
    Fog,
    NotFound,
    Error,
    Humidity,
    Wind,
}

impl IconKey {
    pub const fn all() -> &'static [IconKey] {
        &[
            IconKey::Clear,
            IconKey::Clouds,
            IconKey::Rain,
            IconKey::Drizzle,
            IconKey::Mist,
            IconKey::Snow,
            IconKey::Thunderstorm,
            IconKey::Haze,
            IconKey::Fog,
            IconKey::NotFound,
            IconKey::Error,
            IconKey::Humidity,
            IconKey::Wind,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconKey::Clear => "clear",
            IconKey::Clouds => "clouds",
            IconKey::Rain => "rain",
            IconKey::Drizzle => "drizzle",
            IconKey::Mist => "mist",
            IconKey::Snow => "snow",
            IconKey::Thunderstorm => "thunderstorm",
            IconKey::Haze => "haze",
            IconKey::Fog => "fog",
            IconKey::NotFound => "not-found",
            IconKey::Error => "error",
            IconKey::Humidity => "humidity",
            IconKey::Wind => "wind",
        }
    }

    /// Image file backing this icon. The error state is drawn as a glyph and has none.
    pub fn file_name(&self) -> Option<&'static str> {
        let name = match self {
            IconKey::Clear => "clear.png",
            IconKey::Clouds => "clouds.png",
            IconKey::Rain | IconKey::Thunderstorm => "rain.png",
            IconKey::Drizzle => "drizzle.png",
            IconKey::Mist | IconKey::Haze | IconKey::Fog => "mist.png",
            IconKey::Snow => "snow.png",
            IconKey::NotFound => "404.png",
            IconKey::Humidity => "humidity.png",
            IconKey::Wind => "wind.png",
            IconKey::Error => return None,
        };
        Some(name)
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconKey::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown icon '{s}'"))
    }
}

/// Read-only mapping from condition category to icon, with Clear as the fallback.
#[derive(Debug, Clone)]
pub struct IconAsset {
    by_condition: HashMap<Condition, IconKey>,
    fallback: IconKey,
}

static STANDARD: LazyLock<IconAsset> = LazyLock::new(IconAsset::standard);

/// Process-wide icon table, built on first use.
pub fn icons() -> &'static IconAsset {
    &STANDARD
}

impl IconAsset {
    pub fn standard() -> Self {
        let by_condition = HashMap::from([
            (Condition::Clear, IconKey::Clear),
            (Condition::Clouds, IconKey::Clouds),
            (Condition::Rain, IconKey::Rain),
            (Condition::Drizzle, IconKey::Drizzle),
            (Condition::Mist, IconKey::Mist),
            (Condition::Snow, IconKey::Snow),
            (Condition::Thunderstorm, IconKey::Thunderstorm),
            (Condition::Haze, IconKey::Haze),
            (Condition::Fog, IconKey::Fog),
        ]);

        Self { by_condition, fallback: IconKey::Clear }
    }

    pub fn lookup(&self, condition: &Condition) -> IconKey {
        self.by_condition.get(condition).copied().unwrap_or(self.fallback)
    }
}
