//! HTTP surface: the search page, a JSON card endpoint, icons and health.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use weather_card_core::{IconKey, ViewModel, WeatherCard};

use crate::{assets::AssetStore, render::Templates};

#[derive(Debug, Clone)]
pub struct AppState {
    pub card: WeatherCard,
    pub assets: Arc<AssetStore>,
    pub templates: Templates,
}

/// Query string of the search form. `city` is present only once the form is submitted.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    city: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/weather", get(api_weather))
        .route("/icons/{key}", get(icon))
        .route("/health", get(health))
        .with_state(state)
}

/// `GET /` renders the form, and the card when a search was submitted.
async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let vm = match params.city.as_deref() {
        Some(city) => Some(state.card.submit(city).await),
        None => None,
    };

    match state.templates.page(params.city.as_deref().unwrap_or_default(), vm.as_ref()) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /api/weather?city=` returns the view model; error states are part of it.
async fn api_weather(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ViewModel> {
    Json(state.card.submit(params.city.as_deref().unwrap_or_default()).await)
}

/// `GET /icons/{key}`
async fn icon(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    let Ok(key) = key.parse::<IconKey>() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.assets.get(key) {
        Some(bytes) => (
            [
                (header::CONTENT_TYPE, "image/png"),
                (header::CACHE_CONTROL, "public, max-age=86400"),
            ],
            bytes.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// `GET /health`
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
