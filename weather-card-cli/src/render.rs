//! Page and card templates, rendered with Tera.
//!
//! The templates are compiled into the binary and parsed once. HTML templates
//! are autoescaped, so city names and provider text never reach the page as markup.
//! The terminal card is a `.txt` template and is left as plain text.

use std::sync::Arc;

use anyhow::Context as _;
use serde::Serialize;
use tera::{Context, Tera};
use weather_card_core::{IconKey, ViewModel, model::MAX_CITY_CHARS};

mod embedded {
    pub const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Weather App</title>
<style>
    body { background-color: rgb(100, 100, 100); font-family: sans-serif; color: #fff; }
    main { max-width: 520px; margin: 40px auto; text-align: center; }
    .search-row { display: flex; justify-content: center; gap: 12px; margin-bottom: 24px; }
    .search-row input {
        font-size: 20px; border-radius: 30px; background: #23242a; color: #fff;
        border: none; width: 320px; height: 44px; padding: 0 25px;
    }
    .search-row button {
        background: #fff; border: 2px solid #5b548a; border-radius: 50%;
        height: 56px; width: 56px; font-size: 24px; cursor: pointer;
    }
    .weather-card {
        background: linear-gradient(135deg, #00feba, #5b548a);
        padding: 40px 35px; border-radius: 20px; margin: 20px auto; max-width: 470px;
    }
    .weather-icon { font-size: 120px; margin: 20px 0; }
    .temperature { font-size: 80px; font-weight: 500; margin: 10px 0; }
    .city-name { font-size: 45px; font-weight: 400; margin-bottom: 30px; }
    .weather-details { display: flex; justify-content: space-between; margin-top: 30px; padding: 0 20px; }
    .detail-col { flex: 1; }
    .detail-value { font-size: 28px; font-weight: bold; margin: 5px 0; }
    .detail-label { font-size: 14px; opacity: 0.8; }
</style>
</head>
<body>
<main>
<h1>🌤️ Weather App</h1>
<p>Enter a city name to get the current weather information.</p>
<form class="search-row" method="get" action="/">
    <input type="text" name="city" maxlength="{{ max_city_chars }}" placeholder="Enter city name" value="{{ city }}" autofocus>
    <button type="submit" title="Search">🔍</button>
</form>
{% if card %}{% if card.layout == "reading" %}{% include "card/reading.html" %}{% elif card.layout == "not_found" %}{% include "card/not_found.html" %}{% else %}{% include "card/error.html" %}{% endif %}{% endif %}
</main>
</body>
</html>
"#;

    pub const DETAILS: &str = r#"<div class="weather-details">
        <div class="detail-col">
            <div class="detail-icon"><img src="/icons/humidity" alt="Humidity Icon" width="40"></div>
            <div class="detail-value">{{ card.humidity }}</div>
            <div class="detail-label">Humidity</div>
        </div>
        <div class="detail-col">
            <div class="detail-icon"><img src="/icons/wind" alt="Wind Speed Icon" width="40"></div>
            <div class="detail-value">{{ card.wind }}</div>
            <div class="detail-label">Wind Speed</div>
        </div>
    </div>"#;

    pub const READING: &str = r#"<div class="weather-card">
    <div class="weather-icon"><img src="/icons/{{ card.icon }}" alt="{{ card.condition }} icon" width="120"></div>
    <div class="temperature">{{ card.temperature }}</div>
    <div class="city-name">{{ card.headline }}</div>
    {% include "card/details.html" %}
</div>"#;

    pub const NOT_FOUND: &str = r#"<div class="weather-card">
    <div class="weather-icon"><img src="/icons/not-found" alt="404 City Not Found" width="450"></div>
    <div class="temperature">{{ card.temperature }}</div>
    {% include "card/details.html" %}
</div>"#;

    pub const ERROR: &str = r#"<div class="weather-card">
    <div class="weather-icon">❌</div>
    <div class="city-name">{{ card.headline }}</div>
    <div class="temperature">{{ card.temperature }}</div>
    {% include "card/details.html" %}
</div>"#;

    pub const TEXT: &str = r"{% if card.layout == 'error' %}❌{% else %}[{{ card.icon }}]{% endif %}
{% if card.layout != 'not_found' %}{{ card.headline }}
{% endif %}Temperature : {{ card.temperature }}
Humidity    : {{ card.humidity }}
Wind Speed  : {{ card.wind }}";
}

/// Which card markup a view model gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Layout {
    Reading,
    NotFound,
    Error,
}

impl Layout {
    fn of(vm: &ViewModel) -> Self {
        if vm.has_reading() {
            Layout::Reading
        } else if vm.icon == IconKey::NotFound {
            Layout::NotFound
        } else {
            Layout::Error
        }
    }
}

/// Template context for one card.
#[derive(Debug, Serialize)]
struct CardContext<'a> {
    layout: Layout,
    headline: &'a str,
    icon: IconKey,
    /// Alt text subject; the provider's condition when there is one.
    condition: &'a str,
    temperature: &'a str,
    humidity: &'a str,
    wind: &'a str,
}

impl<'a> From<&'a ViewModel> for CardContext<'a> {
    fn from(vm: &'a ViewModel) -> Self {
        Self {
            layout: Layout::of(vm),
            headline: &vm.headline,
            icon: vm.icon,
            condition: vm.condition.as_deref().unwrap_or(vm.icon.as_str()),
            temperature: &vm.temperature_label,
            humidity: &vm.humidity_label,
            wind: &vm.wind_label,
        }
    }
}

/// Compiled page and card templates, shared across requests.
#[derive(Clone)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}

impl Templates {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html", ".htm", ".xml"]);

        tera.add_raw_templates(vec![
            ("card/details.html", embedded::DETAILS),
            ("card/reading.html", embedded::READING),
            ("card/not_found.html", embedded::NOT_FOUND),
            ("card/error.html", embedded::ERROR),
            ("card.txt", embedded::TEXT),
            ("page.html", embedded::PAGE),
        ])
        .context("Failed to compile page templates")?;

        Ok(Self { tera: Arc::new(tera) })
    }

    /// Full page: search form, plus the card when a search was submitted.
    pub fn page(&self, city: &str, vm: Option<&ViewModel>) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("city", city);
        ctx.insert("max_city_chars", &MAX_CITY_CHARS);
        ctx.insert("card", &vm.map(CardContext::from));
        self.render("page.html", &ctx)
    }

    /// Plain-text card for the terminal.
    pub fn text_card(&self, vm: &ViewModel) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("card", &CardContext::from(vm));
        self.render("card.txt", &ctx)
    }

    fn render(&self, name: &str, ctx: &Context) -> anyhow::Result<String> {
        self.tera.render(name, ctx).with_context(|| format!("Failed to render template {name}"))
    }
}
