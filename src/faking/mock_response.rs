//! The concrete fake response.

use super::fake_response::{ExceptionRule, FakeResponse};
use super::fixture::Fixture;
use crate::error::Result;
use crate::repositories::body::{Body, Payload};
use crate::repositories::ArrayStore;

/// A fake HTTP response: status, headers, body and an optional exception rule.
///
/// Status and headers are stored exactly as supplied. The body is stored in the
/// repository chosen by [`Body::from_payload`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tavern_http::{BodyRepository, FakeResponse, MockResponse};
///
/// let mut response = MockResponse::make(
///     json!({"id": 1}),
///     201,
///     [("Content-Type", "application/json")],
/// )
/// .unwrap();
///
/// assert_eq!(response.status(), 201);
/// assert_eq!(response.body().contents().unwrap(), r#"{"id":1}"#);
/// assert!(!response.throws_exception());
///
/// response.throw(tavern_http::ExceptionRule::message("gateway timeout"));
/// assert!(response.throws_exception());
/// ```
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    headers: ArrayStore,
    body: Body,
    exception: Option<ExceptionRule>,
}

impl MockResponse {
    /// Create a response from an already built body
    pub fn new(body: Body, status: u16, headers: ArrayStore) -> Self {
        MockResponse {
            status,
            headers,
            body,
            exception: None,
        }
    }

    /// Create a response from any payload.
    ///
    /// Fails with [`TavernError::InvalidArgument`](crate::TavernError::InvalidArgument)
    /// when the payload has no body repository (a bare number or boolean).
    pub fn make<I, K, V>(body: impl Into<Payload>, status: u16, headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(Self::new(
            Body::from_payload(body)?,
            status,
            ArrayStore::from_iter(headers),
        ))
    }

    /// `200 OK` with no headers
    pub fn ok(body: impl Into<Payload>) -> Result<Self> {
        Self::make(body, 200, ArrayStore::new())
    }

    /// Load the named fixture using the process-wide [`MockConfig`](crate::MockConfig).
    ///
    /// Fails with [`TavernError::DirectoryNotFound`](crate::TavernError::DirectoryNotFound)
    /// when the fixture directory does not exist.
    pub fn fixture(name: &str) -> Result<Fixture> {
        Fixture::new(name)
    }

    /// Add a header, builder style
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(name, value);
        self
    }
}

impl FakeResponse for MockResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn headers(&self) -> &ArrayStore {
        &self.headers
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn throw(&mut self, rule: impl Into<ExceptionRule>) -> &mut Self {
        self.exception = Some(rule.into());
        self
    }

    fn exception_rule(&self) -> Option<&ExceptionRule> {
        self.exception.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TavernError;
    use crate::faking::factory::{BytesStreamFactory, HttpResponseFactory};
    use crate::faking::fake_response::simulated;
    use crate::repositories::body::{BodyRepository, StreamHandle};
    use crate::request::PendingRequest;
    use bytes::Bytes;
    use serde_json::json;
    use std::io;
    use std::sync::Arc;

    fn pending() -> PendingRequest {
        PendingRequest::get("https://api.example.com/users").unwrap()
    }

    #[test]
    fn test_make_round_trip() {
        let response = MockResponse::make(
            "Howdy",
            418,
            [("X-Teapot", "yes"), ("content-type", "text/plain")],
        )
        .unwrap();

        assert_eq!(response.status(), 418);
        assert_eq!(
            response.headers(),
            &ArrayStore::from_iter([("X-Teapot", "yes"), ("content-type", "text/plain")])
        );
        assert_eq!(response.body().as_string().unwrap().all(), "Howdy");
    }

    #[test]
    fn test_make_structured_body() {
        let response = MockResponse::make(json!({"name": "Sam"}), 200, ArrayStore::new()).unwrap();
        assert_eq!(response.body().as_json().unwrap().all(), &json!({"name": "Sam"}));
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_make_rejects_scalar_body() {
        let err = MockResponse::make(true, 200, ArrayStore::new()).unwrap_err();
        assert!(matches!(err, TavernError::InvalidArgument(_)));
    }

    #[test]
    fn test_fresh_response_does_not_throw() {
        let response = MockResponse::ok(()).unwrap();
        assert!(!response.throws_exception());
        assert!(response.get_exception(&pending()).is_none());
    }

    #[test]
    fn test_throw_marks_response_regardless_of_status() {
        let mut response = MockResponse::ok("fine").unwrap();
        response.throw(ExceptionRule::resolver(|_| None));
        assert_eq!(response.status(), 200);
        assert!(response.throws_exception());
        assert!(response.get_exception(&pending()).is_none());
    }

    #[test]
    fn test_throw_literal_returns_same_instance() {
        let failure = simulated(io::Error::other("boom"));
        let mut response = MockResponse::ok(()).unwrap();
        let returned = response.throw(failure.clone()) as *const MockResponse;
        assert_eq!(returned, &response as *const MockResponse);

        let resolved = response.get_exception(&pending()).unwrap();
        assert!(Arc::ptr_eq(&resolved, &failure));
    }

    #[test]
    fn test_throw_overwrites_rule() {
        let mut response = MockResponse::ok(()).unwrap();
        response
            .throw(ExceptionRule::message("first"))
            .throw(ExceptionRule::message("second"));
        assert_eq!(response.get_exception(&pending()).unwrap().to_string(), "second");
    }

    #[test]
    fn test_resolver_receives_pending_request() {
        let mut response = MockResponse::ok(()).unwrap();
        response.throw(ExceptionRule::resolver(|request| {
            Some(simulated(io::Error::other(request.url().path().to_string())))
        }));
        let failure = response.get_exception(&pending()).unwrap();
        assert_eq!(failure.to_string(), "/users");
    }

    #[test]
    fn test_create_response() {
        let response = MockResponse::make("created", 201, [("Location", "/users/1")]).unwrap();
        let http_response = response
            .create_response(&HttpResponseFactory, &BytesStreamFactory)
            .unwrap();

        assert_eq!(http_response.status().as_u16(), 201);
        assert_eq!(http_response.headers()["location"], "/users/1");
        assert_eq!(http_response.body(), &Bytes::from("created"));
    }

    #[test]
    fn test_create_response_leaves_stream_rewound() {
        let stream = StreamHandle::memory("streamed");
        let response = MockResponse::ok(stream.clone()).unwrap();

        let first = response
            .create_response(&HttpResponseFactory, &BytesStreamFactory)
            .unwrap();
        let second = response
            .create_response(&HttpResponseFactory, &BytesStreamFactory)
            .unwrap();

        assert_eq!(first.body(), second.body());
        assert_eq!(response.body().contents().unwrap(), "streamed");
        assert_eq!(stream.read_to_end().unwrap(), b"streamed");
    }
}
