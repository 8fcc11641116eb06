use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::provider::openweather::DEFAULT_BASE_URL;

pub const ENV_API_KEY: &str = "WEATHER_CARD_API_KEY";
pub const ENV_BASE_URL: &str = "WEATHER_CARD_BASE_URL";
pub const ENV_LISTEN_ADDR: &str = "WEATHER_CARD_LISTEN_ADDR";
pub const ENV_ASSETS_DIR: &str = "WEATHER_CARD_ASSETS_DIR";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// listen_addr = "0.0.0.0:8080"
/// assets_dir = "/srv/weather-card/images"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather `appid`. Never compiled in; comes from the file or the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Address the web page is served on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory holding the card's icon images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            listen_addr: default_listen_addr(),
            assets_dir: None,
        }
    }
}

impl Config {
    /// Load config from disk (or defaults on first run), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env_from(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Override fields from variables resolved by `lookup`. Blank values are ignored.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(addr) = get(ENV_LISTEN_ADDR) {
            self.listen_addr = addr;
        }
        if let Some(dir) = get(ENV_ASSETS_DIR) {
            self.assets_dir = Some(PathBuf::from(dir));
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-card", "weather-card")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// Returns the API key, treating a blank one as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// API key with all but the last four characters hidden, for logs.
    pub fn masked_api_key(&self) -> String {
        match self.api_key() {
            None => "<unset>".to_string(),
            Some(key) => {
                let len = key.chars().count();
                if len <= 4 {
                    "****".to_string()
                } else {
                    let tail: String = key.chars().skip(len - 4).collect();
                    format!("****{tail}")
                }
            }
        }
    }

    /// Log the effective configuration.
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  api_key     : {}", self.masked_api_key());
        tracing::info!("  base_url    : {}", self.base_url);
        tracing::info!("  listen_addr : {}", self.listen_addr);
        tracing::info!(
            "  assets_dir  : {}",
            self.assets_dir.as_ref().map_or("<unset>".into(), |d| d.display().to_string())
        );
    }
}
