//! Integration tests for `WeatherApiClient` using wiremock HTTP mocks.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wxdash_core::CoordinateKey;
use wxdash_weatherapi::{ProviderError, WeatherApiClient};

fn test_client(base_url: &str) -> WeatherApiClient {
    WeatherApiClient::with_base_url("test-key", 5, &format!("{base_url}/v1"))
        .expect("client construction should not fail")
}

fn new_york() -> CoordinateKey {
    CoordinateKey::from_params(Some("40.7"), Some("-74.0")).expect("valid coordinates")
}

#[tokio::test]
async fn search_sends_key_and_query() {
    let server = MockServer::start().await;
    let body = json!([{ "id": 1, "name": "London", "country": "United Kingdom", "lat": 51.52, "lon": -0.11 }]);

    Mock::given(method("GET"))
        .and(path("/v1/search.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let value = client.search("London").await.expect("search should succeed");
    assert_eq!(value, body);
}

#[tokio::test]
async fn search_by_coordinates_uses_canonical_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search.json"))
        .and(query_param("q", "40.7,-74.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let value = client
        .search_by_coordinates(&new_york())
        .await
        .expect("reverse search should succeed");
    assert_eq!(value, json!([]));
}

#[tokio::test]
async fn forecast_requests_days_without_air_quality() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("q", "40.7,-74.0"))
        .and(query_param("days", "3"))
        .and(query_param("aqi", "no"))
        .and(query_param("alerts", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let value = client
        .forecast(&new_york(), 3)
        .await
        .expect("forecast should succeed");
    assert_eq!(value["ok"], true);
}

#[tokio::test]
async fn upstream_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 2008, "message": "API key has been disabled." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .forecast(&new_york(), 7)
        .await
        .expect_err("403 should be an error");

    match err {
        ProviderError::Status { status, ref message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "API key has been disabled.");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
    assert_eq!(err.to_string(), "WeatherAPI error: API key has been disabled.");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_reason_phrase() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search.json"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("Paris").await.expect_err("502 should fail");
    assert!(
        matches!(err, ProviderError::Status { status: 502, ref message } if message == "Bad Gateway"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("Paris").await.expect_err("should fail");
    match err {
        ProviderError::Decode { context, .. } => {
            assert_eq!(context, "search.json");
            assert!(!context.contains("test-key"));
        }
        other => panic!("expected Decode error, got: {other:?}"),
    }
}

#[tokio::test]
async fn no_retry_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.forecast(&new_york(), 7).await.is_err());
}

#[tokio::test]
async fn slow_upstream_times_out_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": true }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = WeatherApiClient::with_base_url("timeout-key", 1, &format!("{}/v1", server.uri()))
        .expect("client construction should not fail");
    let err = client
        .forecast(&new_york(), 7)
        .await
        .expect_err("request should time out");

    match err {
        ProviderError::Http(ref e) => assert!(e.is_timeout(), "expected timeout, got: {e:?}"),
        ref other => panic!("expected Http error, got: {other:?}"),
    }
    assert!(!err.to_string().contains("timeout-key"), "api key leaked: {err}");
    assert!(!format!("{err:?}").contains("timeout-key"), "api key leaked: {err:?}");
}

#[tokio::test]
async fn connection_failure_does_not_leak_api_key() {
    // Grab a free port, then close it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .expect("bind ephemeral port")
        .port();

    let client =
        WeatherApiClient::with_base_url("SECRET-KEY-123", 5, &format!("http://127.0.0.1:{port}/v1"))
            .expect("client construction should not fail");
    let err = client
        .search("London")
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, ProviderError::Http(_)), "unexpected error: {err:?}");
    assert!(!err.to_string().contains("SECRET-KEY-123"), "api key leaked: {err}");
    assert!(!format!("{err:?}").contains("SECRET-KEY-123"), "api key leaked: {err:?}");
}
