// Integration tests for `RemoteSource` using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use airlines_api::{AirlineSource, Error, RemoteSource, TlsMode, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RemoteSource) {
    let server = MockServer::start().await;
    let base = url::Url::parse(&server.uri()).unwrap();
    let source = RemoteSource::with_client(reqwest::Client::new(), &base).unwrap();
    (server, source)
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_airlines() {
    let (server, source) = setup().await;

    let body = json!([
        {
            "id": "A1",
            "name": "Delta",
            "country": "USA",
            "headquarters": "Atlanta, Georgia",
            "fleet_size": 975,
            "website": "https://www.delta.com",
            "logo_url": "https://logo.clearbit.com/delta.com"
        },
        {
            "id": "LH",
            "name": "Lufthansa",
            "country": "Germany",
            "headquarters": "Cologne",
            "fleet_size": 300,
            "website": "https://www.lufthansa.com",
            "logo_url": "https://logo.clearbit.com/lufthansa.com"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/airlines.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let airlines = source.fetch().await.unwrap();

    assert_eq!(airlines.len(), 2);
    assert_eq!(airlines[0].id, "A1");
    assert_eq!(airlines[0].name, "Delta");
    assert_eq!(airlines[1].country, "Germany");
    assert_eq!(airlines[1].fleet_size, 300);
}

#[tokio::test]
async fn test_every_fetch_hits_the_network() {
    let (server, source) = setup().await;

    Mock::given(method("GET"))
        .and(path("/airlines.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    assert!(source.fetch().await.unwrap().is_empty());
    assert!(source.fetch().await.unwrap().is_empty());
}

// ── Error paths ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_status() {
    let (server, source) = setup().await;

    Mock::given(method("GET"))
        .and(path("/airlines.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = source.fetch().await.unwrap_err();
    match err {
        Error::Status { status, ref url } => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/airlines.json"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, source) = setup().await;

    Mock::given(method("GET"))
        .and(path("/airlines.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = source.fetch().await.unwrap_err();
    match &err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
    assert!(err.is_parse());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/airlines.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let base = url::Url::parse(&server.uri()).unwrap();
    let transport = TransportConfig {
        tls: TlsMode::System,
        timeout: Duration::from_secs(1),
    };
    let source = RemoteSource::new(&base, &transport).unwrap();

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_secs: 1 }), "got {err:?}");
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then release an ephemeral port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base = url::Url::parse(&format!("http://{addr}")).unwrap();

    let source = RemoteSource::with_client(reqwest::Client::new(), &base).unwrap();
    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
    assert!(err.is_transient());
}
