//! Cross-module flows: fixtures feeding the mock client, stream bodies surviving
//! dispatch, and the process-wide fixture configuration.

use crate::config::MockConfig;
use crate::error::TavernError;
use crate::faking::{simulated, DataEncoding, ExceptionRule, FakeResponse, Fixture, MockClient, MockResponse, RecordedResponse};
use crate::repositories::body::{BodyRepository, StreamBodyRepository, StreamHandle};
use crate::repositories::{ArrayStore, Conditionable};
use crate::request::PendingRequest;
use bytes::Bytes;
use serde_json::json;
use std::io;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn fixture_config(dir: &tempfile::TempDir) -> MockConfig {
    MockConfig {
        fixture_path: dir.path().to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn test_global_config_drives_fixtures_and_client() {
    let dir = tempfile::tempdir().unwrap();
    let previous = MockConfig::global();

    MockConfig::set_global(MockConfig {
        fixture_path: dir.path().join("missing"),
        ..Default::default()
    });
    let err = MockResponse::fixture("users/index").unwrap_err();
    assert!(matches!(err, TavernError::DirectoryNotFound { .. }), "{err}");

    MockConfig::set_global(MockConfig {
        enable_logging: false,
        ..fixture_config(&dir)
    });
    let fixture = MockResponse::fixture("users/index");
    let client = MockClient::new();

    MockConfig::set_global(previous);
    assert!(!client.config().enable_logging);
    let fixture = fixture.unwrap();
    assert_eq!(fixture.name(), "users/index");
    assert!(!fixture.exists());
}

#[test]
fn test_record_then_replay_through_client() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let fixture = Fixture::with_config("users/show", fixture_config(&dir)).unwrap();

    // First run: nothing recorded, the "live" response gets stored.
    assert!(fixture.mock_response().unwrap().is_none());
    let live = http::Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .body(Bytes::from(r#"{"id":1,"name":"Sam"}"#))
        .unwrap();
    fixture.store(&RecordedResponse::from_http(&live)).unwrap();

    // Second run: replay from disk.
    let replay = fixture.mock_response().unwrap().unwrap();
    let mut client = MockClient::sequence([replay]);
    let request = PendingRequest::get("https://api.example.com/users/1").unwrap();
    let response = client.send(&request).unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "application/json");
    let user: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(user, json!({"id": 1, "name": "Sam"}));
    client.assert_sent("*/users/1");
}

#[test]
fn test_stream_body_survives_repeated_dispatch() {
    let stream = StreamHandle::memory("Howdy");
    let mut client = MockClient::new();
    client
        .on("*", MockResponse::ok(stream.clone()).unwrap())
        .unwrap();

    let request = PendingRequest::get("https://example.com").unwrap();
    for _ in 0..3 {
        assert_eq!(client.send(&request).unwrap().body(), &Bytes::from("Howdy"));
    }
    assert_eq!(stream.read_to_end().unwrap(), b"Howdy");
}

#[test]
fn test_failure_depends_on_request_body() {
    let mut response = MockResponse::make(json!({"ok": true}), 200, ArrayStore::new()).unwrap();
    response.throw(ExceptionRule::resolver(|request| {
        let body = request.body()?.contents().ok()?;
        body.contains("invalid")
            .then(|| simulated(io::Error::new(io::ErrorKind::InvalidData, "rejected")))
    }));

    let mut client = MockClient::new();
    client.on("*/orders", response).unwrap();

    let good = PendingRequest::new(http::Method::POST, "https://shop.test/orders")
        .unwrap()
        .with_body(StreamBodyRepository::new(StreamHandle::memory("{\"sku\":\"a\"}")).unwrap());
    let bad = PendingRequest::new(http::Method::POST, "https://shop.test/orders")
        .unwrap()
        .with_body(StreamBodyRepository::new(StreamHandle::memory("invalid")).unwrap());

    assert!(client.send(&good).is_ok());
    let err = client.send(&bad).unwrap_err();
    assert_eq!(err.simulated().unwrap().to_string(), "rejected");
    assert_eq!(client.recorded_count(), 2);
}

#[test]
fn test_shared_failure_instance_across_responses() {
    let failure = simulated(io::Error::other("maintenance"));
    let mut first = MockResponse::ok(()).unwrap();
    let mut second = MockResponse::make("", 503, ArrayStore::new()).unwrap();
    first.throw(failure.clone());
    second.throw(failure.clone());

    let mut client = MockClient::sequence([first, second]);
    let request = PendingRequest::get("https://example.com").unwrap();
    for _ in 0..2 {
        let err = client.send(&request).unwrap_err();
        assert!(Arc::ptr_eq(err.simulated().unwrap(), &failure));
    }
}

#[test]
fn test_conditional_body_setup() {
    let replay_binary = true;
    let mut body = StreamBodyRepository::empty();
    body.try_when(replay_binary, |body| {
        body.set(StreamHandle::memory(vec![0xff_u8, 0x00, 0xfe])).map(|_| ())
    })
    .unwrap();

    let recorded =
        RecordedResponse::from_fake_response(&MockResponse::ok(body.get().unwrap().clone()).unwrap())
            .unwrap();
    assert_eq!(recorded.encoding(), Some(DataEncoding::Base64));
    assert_eq!(recorded.body_bytes().unwrap(), Bytes::from_static(&[0xff, 0x00, 0xfe]));
    assert_eq!(body.to_bytes().unwrap(), Bytes::from_static(&[0xff, 0x00, 0xfe]));
}
