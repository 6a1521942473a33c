//! Integration tests for the weather provider against a mock HTTP server.
#![allow(clippy::unwrap_used, clippy::panic)]

use manyapps_core::WeatherConfig;
use manyapps_weather::{WeatherError, WeatherProvider, DEFAULT_ICON};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> WeatherProvider {
    let config = WeatherConfig {
        api_url: format!("{}/v1/current.json", server.uri()),
        api_key: "test-key".to_string(),
        lang: "sr".to_string(),
        timeout_secs: 5,
    };
    WeatherProvider::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_key_city_and_language() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "Novi Sad"))
        .and(query_param("lang", "sr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "Novi Sad", "region": "Vojvodina" },
            "current": {
                "temp_c": 18.5,
                "condition": { "text": "Delimično oblačno", "icon": "//cdn.weatherapi.com/116.png" },
                "humidity": 62,
                "wind_kph": 14.4
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = provider(&server).fetch("Novi Sad").await.unwrap();

    assert_eq!(data.city, "Novi Sad");
    assert_eq!(data.temperature, 19);
    assert_eq!(data.description, "Delimično oblačno");
    assert_eq!(data.humidity, 62);
    assert_eq!(data.wind_speed, 4.0);
    assert_eq!(data.icon, "//cdn.weatherapi.com/116.png");
}

#[tokio::test]
async fn test_fetch_without_icon_uses_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "Subotica" },
            "current": {
                "temp_c": -0.4,
                "condition": { "text": "Sneg" },
                "humidity": 88,
                "wind_kph": 0.0
            }
        })))
        .mount(&server)
        .await;

    let data = provider(&server).fetch("Subotica").await.unwrap();
    assert_eq!(data.icon, DEFAULT_ICON);
    assert_eq!(data.temperature, 0);
}

#[tokio::test]
async fn test_error_status_carries_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&server)
        .await;

    let err = provider(&server).fetch("Nowhere").await.unwrap_err();
    match err {
        WeatherError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "No matching location found.");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_error_status_with_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = provider(&server).fetch("Beograd").await.unwrap_err();
    assert!(matches!(
        err,
        WeatherError::Status { status: 502, ref message } if message == "Bad Gateway"
    ));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"location\":"))
        .mount(&server)
        .await;

    let err = provider(&server).fetch("Beograd").await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = WeatherConfig {
        api_url: "http://127.0.0.1:1/v1/current.json".to_string(),
        api_key: "k".to_string(),
        lang: "sr".to_string(),
        timeout_secs: 2,
    };
    let err = WeatherProvider::new(&config)
        .unwrap()
        .fetch("Beograd")
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Network(_)));
}
