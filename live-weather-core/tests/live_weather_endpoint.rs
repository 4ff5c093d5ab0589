//! Integration tests for `LocationClient` against a mock irrigation server.

use live_weather_core::{
    Config, ErrorKind, LiveLocationError, LocationClient, WeatherResult,
    error::DEFAULT_REJECTION_MESSAGE, geolocation::fixed::FixedGeolocation,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIVE_PATH: &str = "/irrigation/weather/live";

fn client_for(server: &MockServer) -> LocationClient {
    let url = server.uri().parse().unwrap();
    let geo = FixedGeolocation::new(37.7749, -122.4194, 10.0);
    LocationClient::new(url, Box::new(geo)).unwrap()
}

#[tokio::test]
async fn test_success_returns_weather_unchanged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LIVE_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"latitude": 37.7749, "longitude": -122.4194})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "weather": {"city": "Testville", "tempC": 21}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let weather = client.fetch_weather_by_location().await.unwrap();

    assert_eq!(weather, WeatherResult(json!({"city": "Testville", "tempC": 21})));
    assert_eq!(weather.city(), Some("Testville"));

    let last = client.last_known().unwrap();
    assert_eq!(last.latitude, 37.7749);
    assert_eq!(last.longitude, -122.4194);
}

#[tokio::test]
async fn test_rejection_carries_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "no data"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch_weather_by_location().await.unwrap_err();

    assert_eq!(err, LiveLocationError::ServerRejected("no data".to_string()));
    assert_eq!(err.to_string(), "no data");
}

#[tokio::test]
async fn test_rejection_without_message_uses_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch_weather_by_location().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerRejected);
    assert_eq!(err.to_string(), DEFAULT_REJECTION_MESSAGE);
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_error_status_with_envelope_is_rejection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LIVE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Latitude and longitude are required"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch_weather_by_location().await.unwrap_err();

    assert_eq!(
        err,
        LiveLocationError::ServerRejected("Latitude and longitude are required".to_string())
    );
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LIVE_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).fetch_weather_by_location().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("502"), "Error should mention status: {}", err);
}

#[tokio::test]
async fn test_success_without_weather_passes_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&mock_server)
        .await;

    let weather = client_for(&mock_server).fetch_weather_by_location().await.unwrap();

    assert!(weather.as_json().is_null());
    assert_eq!(weather.city(), None);
}

#[tokio::test]
async fn test_session_cookie_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LIVE_PATH))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "weather": {"city": "Farmtown"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).with_session_cookie(Some("session=abc123".into()));
    let weather = client.fetch_weather_by_location().await.unwrap();

    assert_eq!(weather.city(), Some("Farmtown"));
}

#[tokio::test]
async fn test_unsupported_never_hits_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = Config { server_url: mock_server.uri(), ..Config::default() };
    let client = LocationClient::from_config(&config).unwrap();

    assert!(!client.is_supported());
    let err = client.fetch_weather_by_location().await.unwrap_err();
    assert_eq!(err, LiveLocationError::Unsupported);
}

#[tokio::test]
async fn test_from_config_uses_position_and_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LIVE_PATH))
        .and(header("cookie", "session=cfg"))
        .and(body_json(json!({"latitude": -33.86, "longitude": 151.21})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "weather": {"city": "Sydney"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config {
        server_url: mock_server.uri(),
        session_cookie: Some("session=cfg".into()),
        ..Config::default()
    };
    config.set_position(-33.86, 151.21, None);

    let client = LocationClient::from_config(&config).unwrap();
    let weather = client.fetch_weather_by_location().await.unwrap();

    assert_eq!(weather.city(), Some("Sydney"));
}
