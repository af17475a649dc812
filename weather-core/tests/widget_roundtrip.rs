//! End-to-end: widget -> relay (real listener) -> wiremock provider.

use serde_json::json;
use tokio::net::TcpListener;
use weather_core::{
    KeySource, OpenWeatherProvider, RelayClient, RelayState, ViewState, WeatherWidget,
    error::GENERIC_FAILURE, relay::serve,
};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_relay(provider: &MockServer, key: Option<&str>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = RelayState::new(
        OpenWeatherProvider::with_base_url(provider.uri()),
        KeySource::Fixed(key.map(str::to_string)),
    );

    tokio::spawn(serve(listener, state));
    format!("http://{addr}")
}

#[tokio::test]
async fn successful_lookup_builds_display_model() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Paris",
            "sys": { "country": "FR" },
            "main": { "temp": 18.6, "humidity": 55 },
            "weather": [{ "description": "clear sky", "icon": "01d" }],
            "wind": { "speed": 3.2 }
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let relay = spawn_relay(&provider, Some("k")).await;
    let mut widget = WeatherWidget::new(RelayClient::new(relay));

    let weather = widget.submit("  Paris  ").await.weather().cloned().expect("success state");

    assert_eq!(weather.name, "Paris");
    assert_eq!(weather.country, "FR");
    assert_eq!(weather.temp, 19);
    assert_eq!(weather.description, "clear sky");
    assert_eq!(weather.humidity, 55);
    assert_eq!(weather.wind_speed, 3.2);
    assert_eq!(weather.icon, "☀️");
    assert!(!widget.is_loading());
}

#[tokio::test]
async fn provider_not_found_surfaces_message() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "city not found" })),
        )
        .mount(&provider)
        .await;

    let relay = spawn_relay(&provider, Some("k")).await;
    let mut widget = WeatherWidget::new(RelayClient::new(relay));

    assert_eq!(widget.submit("Atlantis").await, &ViewState::Error("city not found".into()));
}

#[tokio::test]
async fn missing_key_surfaces_relay_message() {
    let provider = MockServer::start().await;
    let relay = spawn_relay(&provider, None).await;
    let mut widget = WeatherWidget::new(RelayClient::new(relay));

    assert_eq!(
        widget.submit("Paris").await,
        &ViewState::Error("API key is not configured".into())
    );
}

#[tokio::test]
async fn unreachable_relay_shows_generic_message() {
    let mut widget = WeatherWidget::new(RelayClient::new("http://127.0.0.1:9"));

    let state = widget.submit("Paris").await.clone();

    assert_eq!(state, ViewState::Error(GENERIC_FAILURE.into()));
    assert!(!widget.is_loading());
}

#[tokio::test]
async fn failure_after_success_drops_old_result() {
    let relay_double = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("city", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Paris" })))
        .mount(&relay_double)
        .await;
    Mock::given(method("GET"))
        .and(query_param("city", "Nowhere"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "city not found" })),
        )
        .mount(&relay_double)
        .await;

    let mut widget = WeatherWidget::new(RelayClient::new(relay_double.uri()));

    assert!(widget.submit("Paris").await.weather().is_some());
    assert_eq!(widget.submit("Nowhere").await, &ViewState::Error("city not found".into()));
    assert!(widget.state().weather().is_none());
}
