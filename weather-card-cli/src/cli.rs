use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_card_core::{
    Config, QueryOutcome, WeatherCard, WeatherReading, icons, provider::provider_from_config,
    to_view_model,
};

use crate::{assets::AssetStore, render::Templates, web};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-card", version, about = "Current weather for a city, as a card")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key (and optionally the endpoint) in the config file.
    Configure,

    /// Look up a city once and print its card.
    Show {
        /// City name; several words are joined with spaces.
        city: Vec<String>,

        /// Print the view model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Serve the search page over HTTP.
    Serve {
        /// Listen address, e.g. 0.0.0.0:8080. Defaults to the configured one.
        #[arg(long)]
        addr: Option<String>,

        /// Directory with the icon images.
        #[arg(long)]
        assets: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(&city.join(" "), json).await,
            Command::Serve { addr, assets } => serve(addr, assets).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    // Only the file is edited; environment overrides are not persisted.
    let mut cfg = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("API endpoint:")
        .with_default(&cfg.base_url)
        .prompt()
        .context("Failed to read API endpoint")?;

    cfg.set_api_key(api_key);
    cfg.base_url = base_url.trim().to_string();

    let path = cfg.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show(city: &str, json: bool) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let card = WeatherCard::from_boxed(provider_from_config(&cfg)?);

    let outcome = card.outcome(city).await;
    let vm = to_view_model(&outcome, icons());

    if json {
        println!("{}", serde_json::to_string_pretty(&vm)?);
        return Ok(());
    }

    println!("{}", Templates::new()?.text_card(&vm)?);
    if let QueryOutcome::Success(WeatherReading { observed_at: Some(at), .. }) = &outcome {
        println!("Observed    : {}", at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}

async fn serve(addr: Option<String>, assets: Option<PathBuf>) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    cfg.log_config();

    let provider = provider_from_config(&cfg)?;
    let addr = addr.unwrap_or_else(|| cfg.listen_addr.clone());

    let assets = match assets.or_else(|| cfg.assets_dir.clone()) {
        Some(dir) => AssetStore::load(&dir),
        None => {
            tracing::warn!("No assets directory configured; icons will not be served");
            AssetStore::default()
        }
    };
    if assets.is_empty() {
        tracing::warn!("No icon images loaded; cards will show alt text only");
    } else {
        tracing::info!("Serving {} icons", assets.len());
    }

    let state = web::AppState {
        card: WeatherCard::from_boxed(provider),
        assets: Arc::new(assets),
        templates: Templates::new()?,
    };
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_joins_city_words() {
        let cli = Cli::try_parse_from(["weather-card", "show", "New", "York", "--json"]).unwrap();
        match cli.command {
            Command::Show { city, json } => {
                assert_eq!(city.join(" "), "New York");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "weather-card",
            "serve",
            "--addr",
            "0.0.0.0:9000",
            "--assets",
            "images",
        ])
        .unwrap();

        match cli.command {
            Command::Serve { addr, assets } => {
                assert_eq!(addr.as_deref(), Some("0.0.0.0:9000"));
                assert_eq!(assets, Some(PathBuf::from("images")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["weather-card", "forecast"]).is_err());
    }
}
