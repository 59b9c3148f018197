use std::time::Duration;

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use qweather_core::{CacheStore, LocationId, WeatherClient, WeatherError};

const CACHE_EXPIRY: Duration = Duration::from_secs(30 * 60);

fn client(server: &MockServer, cache_dir: &std::path::Path, expiry: Duration) -> WeatherClient {
    let cache = CacheStore::open(cache_dir, expiry).expect("cache dir must open");
    WeatherClient::new("TESTKEY".to_string(), server.uri(), server.uri(), cache)
}

fn weather_body(temp: &str) -> serde_json::Value {
    json!({
        "code": "200",
        "updateTime": "2024-06-01T12:00+08:00",
        "now": {
            "temp": temp,
            "feelsLike": "19",
            "humidity": "50",
            "windSpeed": "10",
            "windDir": "NE",
            "vis": "16",
            "text": "Sunny"
        }
    })
}

#[tokio::test]
async fn lookup_city_takes_first_match() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v2/city/lookup"))
        .and(query_param("location", "beijing"))
        .and(query_param("key", "TESTKEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "200",
            "location": [
                {"id": "101010100", "name": "北京"},
                {"id": "101010200", "name": "海淀"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client(&server, tmp.path(), CACHE_EXPIRY);
    let location = client.lookup_city("beijing").await.unwrap();

    assert_eq!(location.id, LocationId::from("101010100"));
    assert_eq!(location.name, "北京");
}

#[tokio::test]
async fn lookup_city_reports_unknown_city() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v2/city/lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "404"})))
        .mount(&server)
        .await;

    let client = client(&server, tmp.path(), CACHE_EXPIRY);
    let err = client.lookup_city("atlantis").await.unwrap_err();

    assert!(matches!(err, WeatherError::CityNotFound(city) if city == "atlantis"));
}

#[tokio::test]
async fn fresh_cache_entry_skips_the_network() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v7/weather/now"))
        .and(query_param("location", "101010100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("20")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, tmp.path(), CACHE_EXPIRY);
    let id = LocationId::from("101010100");

    let first = client.current_weather(&id).await.unwrap();
    let second = client.current_weather(&id).await.unwrap();

    assert_eq!(first.now.temp, "20");
    assert_eq!(second.now.temp, "20");
    // the mock's expect(1) verifies on drop that only one request went out
}

#[tokio::test]
async fn expired_cache_entry_is_refetched_and_overwritten() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v7/weather/now"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("20")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v7/weather/now"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("25")))
        .expect(1)
        .mount(&server)
        .await;

    // zero expiry: every entry is already stale on the next lookup
    let client = client(&server, tmp.path(), Duration::ZERO);
    let id = LocationId::from("101010100");

    let first = client.current_weather(&id).await.unwrap();
    let second = client.current_weather(&id).await.unwrap();

    assert_eq!(first.now.temp, "20");
    assert_eq!(second.now.temp, "25");

    let on_disk = std::fs::read_to_string(tmp.path().join("101010100.json")).unwrap();
    assert!(on_disk.contains("\"25\""));
}

#[tokio::test]
async fn provider_error_code_is_not_cached() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v7/weather/now"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "402",
            "updateTime": "2024-06-01T12:00+08:00",
            "now": {
                "temp": "20",
                "feelsLike": "19",
                "humidity": "50",
                "windSpeed": "10",
                "text": "Sunny"
            }
        })))
        .mount(&server)
        .await;

    let client = client(&server, tmp.path(), CACHE_EXPIRY);
    let err = client.current_weather(&LocationId::from("101010100")).await.unwrap_err();

    assert!(matches!(err, WeatherError::Api { code } if code == "402"));
    assert!(!tmp.path().join("101010100.json").exists());
}

#[tokio::test]
async fn http_failure_is_surfaced() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v7/weather/now"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client(&server, tmp.path(), CACHE_EXPIRY);
    let err = client.current_weather(&LocationId::from("101010100")).await.unwrap_err();

    assert!(matches!(err, WeatherError::Status { status, .. } if status.as_u16() == 500));
}

#[tokio::test]
async fn stale_entry_is_not_served_when_the_fetch_fails() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v7/weather/now"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body("20")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v7/weather/now"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client(&server, tmp.path(), Duration::ZERO);
    let id = LocationId::from("101010100");

    client.current_weather(&id).await.unwrap();

    // entry exists on disk but is stale; the failed refetch must win
    let err = client.current_weather(&id).await.unwrap_err();
    assert!(matches!(err, WeatherError::Status { .. }));
}

#[tokio::test]
async fn malformed_weather_payload_is_a_typed_error() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v7/weather/now"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "200"})))
        .mount(&server)
        .await;

    let client = client(&server, tmp.path(), CACHE_EXPIRY);
    let err = client.current_weather(&LocationId::from("101010100")).await.unwrap_err();

    assert!(matches!(err, WeatherError::MalformedPayload(_)));
}
