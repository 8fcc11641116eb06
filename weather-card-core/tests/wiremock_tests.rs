//! Integration tests for the OpenWeather provider and the card pipeline using wiremock.
//!
//! A mock server stands in for the OpenWeather current-weather endpoint so the
//! classification rules can be checked against real HTTP traffic.

use std::sync::Arc;

use weather_card_core::{
    IconKey, OpenWeatherProvider, QueryOutcome, WeatherCard, WeatherQuery, fetch,
    provider::GENERIC_ERROR_MESSAGE,
    view::{EMPTY_INPUT_MESSAGE, HEADLINE_PLACEHOLDER, NETWORK_ERROR_MESSAGE},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const API_KEY: &str = "test-key";

/// Sample OpenWeather current-weather payload
fn london_response() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "base": "stations",
        "main": {
            "temp": 15.4,
            "feels_like": 14.9,
            "temp_min": 14.0,
            "temp_max": 16.6,
            "pressure": 1012,
            "humidity": 72
        },
        "visibility": 10000,
        "wind": {"speed": 4.1, "deg": 240},
        "clouds": {"all": 75},
        "dt": 1_700_000_000,
        "sys": {"country": "GB", "sunrise": 1_699_945_000, "sunset": 1_699_978_000},
        "timezone": 0,
        "id": 2_643_743,
        "name": "London",
        "cod": 200
    })
}

fn not_found_response() -> serde_json::Value {
    serde_json::json!({"cod": "404", "message": "city not found"})
}

fn provider_for(mock_server: &MockServer) -> OpenWeatherProvider {
    let base_url = format!("{}/data/2.5/weather", mock_server.uri());
    OpenWeatherProvider::with_base_url(API_KEY.into(), base_url)
}

fn card_for(mock_server: &MockServer) -> WeatherCard {
    WeatherCard::new(Arc::new(provider_for(mock_server)))
}

/// A base URL nothing is listening on.
fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/data/2.5/weather")
}

async fn mount(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Provider
// ============================================================================

#[tokio::test]
async fn sends_metric_query_with_credential() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let query = WeatherQuery::parse("London").unwrap();
    let outcome = fetch(&provider, &query).await;

    match outcome {
        QueryOutcome::Success(reading) => {
            assert_eq!(reading.city_name, "London");
            assert_eq!(reading.temperature_celsius, 15);
            assert_eq!(reading.humidity_percent, 72);
            assert_eq!(reading.wind_speed_kmh, 14.8);
        }
        other => panic!("Expected success, got: {other:?}"),
    }
}

#[tokio::test]
async fn provider_not_found_status() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, ResponseTemplate::new(404).set_body_json(not_found_response())).await;

    let provider = provider_for(&mock_server);
    let query = WeatherQuery::parse("Zzznotacity").unwrap();

    assert_eq!(fetch(&provider, &query).await, QueryOutcome::NotFound);
}

#[tokio::test]
async fn bad_credential_is_reported_as_not_found() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        ResponseTemplate::new(401)
            .set_body_json(serde_json::json!({"cod": 401, "message": "Invalid API key"})),
    )
    .await;

    let provider = provider_for(&mock_server);
    let query = WeatherQuery::parse("London").unwrap();

    assert_eq!(fetch(&provider, &query).await, QueryOutcome::NotFound);
}

#[tokio::test]
async fn non_json_body_is_generic_error() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .await;

    let provider = provider_for(&mock_server);
    let query = WeatherQuery::parse("London").unwrap();

    assert_eq!(
        fetch(&provider, &query).await,
        QueryOutcome::OtherError(GENERIC_ERROR_MESSAGE.into())
    );
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    let provider = OpenWeatherProvider::with_base_url(API_KEY.into(), refused_url());
    let query = WeatherQuery::parse("London").unwrap();

    assert_eq!(fetch(&provider, &query).await, QueryOutcome::NetworkError);
}

// ============================================================================
// Pipeline
// ============================================================================

#[tokio::test]
async fn london_card() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, ResponseTemplate::new(200).set_body_json(london_response())).await;

    let vm = card_for(&mock_server).submit("London").await;

    assert_eq!(vm.headline, "London");
    assert_eq!(vm.icon, IconKey::Rain);
    assert_eq!(vm.temperature_label, "15°C");
    assert_eq!(vm.humidity_label, "72%");
    assert_eq!(vm.wind_label, "14.8 km/h");
}

#[tokio::test]
async fn not_found_card() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, ResponseTemplate::new(404).set_body_json(not_found_response())).await;

    let vm = card_for(&mock_server).submit("Zzznotacity").await;

    assert_eq!(vm.headline, HEADLINE_PLACEHOLDER);
    assert_eq!(vm.icon, IconKey::NotFound);
    assert_eq!(vm.temperature_label, "--°C");
    assert_eq!(vm.humidity_label, "--%");
    assert_eq!(vm.wind_label, "-- km/h");
}

#[tokio::test]
async fn empty_input_never_hits_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_response()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let card = card_for(&mock_server);
    for raw in ["", "   "] {
        let vm = card.submit(raw).await;
        assert_eq!(vm.headline, EMPTY_INPUT_MESSAGE);
        assert_eq!(vm.icon, IconKey::Error);
    }
}

#[tokio::test]
async fn network_error_card() {
    let card = WeatherCard::new(Arc::new(OpenWeatherProvider::with_base_url(
        API_KEY.into(),
        refused_url(),
    )));

    let vm = card.submit("London").await;

    assert_eq!(vm.headline, NETWORK_ERROR_MESSAGE);
    assert_eq!(vm.icon, IconKey::Error);
    assert_eq!(vm.temperature_label, "--°C");
}

#[tokio::test]
async fn unknown_condition_falls_back_to_clear_icon() {
    let mock_server = MockServer::start().await;
    let mut body = london_response();
    body["weather"][0]["main"] = serde_json::json!("Tornado");
    mount(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let vm = card_for(&mock_server).submit("London").await;

    assert_eq!(vm.icon, IconKey::Clear);
}

#[tokio::test]
async fn identical_responses_give_identical_cards() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, ResponseTemplate::new(200).set_body_json(london_response())).await;

    let card = card_for(&mock_server);
    let first = serde_json::to_vec(&card.submit("London").await).unwrap();
    let second = serde_json::to_vec(&card.submit("London").await).unwrap();

    assert_eq!(first, second);
}
