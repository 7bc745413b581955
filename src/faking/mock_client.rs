//! Dispatch layer answering pending requests with fake responses.

use super::factory::{BytesStreamFactory, HttpResponseFactory, ResponseFactory, StreamFactory};
use super::fake_response::FakeResponse;
use super::mock_response::MockResponse;
use crate::config::MockConfig;
use crate::error::{Result, TavernError};
use crate::repositories::Conditionable;
use crate::request::PendingRequest;
use bytes::Bytes;
use regex::Regex;
use std::collections::VecDeque;

/// URL pattern where `*` matches any run of characters.
///
/// Patterns match the end of the full request URL, so the scheme and host may be
/// left out: `api.example.com/users/*` matches `https://api.example.com/users/1`.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    source: String,
    regex: Regex,
}

impl UrlPattern {
    /// Compile a wildcard pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let escaped = regex::escape(pattern).replace(r"\*", ".*");
        let regex = Regex::new(&format!("^.*{}$", escaped))
            .map_err(|e| TavernError::invalid_argument(format!("Invalid URL pattern: {}", e)))?;
        Ok(UrlPattern {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `url` matches
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}

/// Answers requests with fake responses instead of touching the network.
///
/// Queued responses are consumed first, in order. Once the queue is empty, the
/// first URL pattern matching the request decides the response; pattern responses
/// are reused for every matching request.
///
/// A response with an exception rule fails the send with
/// [`TavernError::Simulated`] whenever the rule resolves to a failure.
///
/// # Examples
///
/// ```
/// use tavern_http::{ExceptionRule, FakeResponse, MockClient, MockResponse, PendingRequest};
///
/// let mut client = MockClient::new();
/// client
///     .on("*/users/*", MockResponse::ok("{\"id\":1}").unwrap())
///     .unwrap()
///     .on("*/health", {
///         let mut down = MockResponse::ok(()).unwrap();
///         down.throw(ExceptionRule::message("connection refused"));
///         down
///     })
///     .unwrap();
///
/// let user = client.send(&PendingRequest::get("https://api.test/users/1").unwrap()).unwrap();
/// assert_eq!(user.status(), 200);
///
/// let health = client.send(&PendingRequest::get("https://api.test/health").unwrap());
/// assert!(health.unwrap_err().is_simulated());
///
/// client.assert_sent_count(2);
/// ```
#[derive(Debug)]
pub struct MockClient {
    queue: VecDeque<MockResponse>,
    routes: Vec<(UrlPattern, MockResponse)>,
    recorded: Vec<PendingRequest>,
    config: MockConfig,
}

impl Default for MockClient {
    fn default() -> Self {
        MockClient {
            queue: VecDeque::new(),
            routes: Vec::new(),
            recorded: Vec::new(),
            config: MockConfig::global(),
        }
    }
}

impl MockClient {
    /// Empty client using the process-wide [`MockConfig`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Client answering with `responses` in order
    pub fn sequence(responses: impl IntoIterator<Item = MockResponse>) -> Self {
        MockClient {
            queue: responses.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Replace the config
    pub fn with_config(mut self, config: MockConfig) -> Self {
        self.config = config;
        self
    }

    /// The config used for dispatch logging
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Queue a response
    pub fn push(&mut self, response: MockResponse) -> &mut Self {
        self.queue.push_back(response);
        self
    }

    /// Answer requests whose URL matches `pattern`
    pub fn on(&mut self, pattern: &str, response: MockResponse) -> Result<&mut Self> {
        self.routes.push((UrlPattern::new(pattern)?, response));
        Ok(self)
    }

    /// Number of queued responses left
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Pick the response for `request` without recording or consuming anything
    pub fn find_response(&self, request: &PendingRequest) -> Option<&MockResponse> {
        if let Some(next) = self.queue.front() {
            return Some(next);
        }
        let url = request.full_url();
        self.routes
            .iter()
            .find(|(pattern, _)| pattern.matches(&url))
            .map(|(_, response)| response)
    }

    /// Send `request` and convert the fake response into an [`http::Response`]
    pub fn send(&mut self, request: &PendingRequest) -> Result<http::Response<Bytes>> {
        self.send_with(request, &HttpResponseFactory, &BytesStreamFactory)
    }

    /// Send `request`, building the response with custom factories.
    ///
    /// A response that cannot be converted (bad status or header) is left in place
    /// and the request is not recorded. Simulated failures consume the response and
    /// record the request like any other answer.
    pub fn send_with<R, S>(
        &mut self,
        request: &PendingRequest,
        response_factory: &R,
        stream_factory: &S,
    ) -> Result<R::Response>
    where
        R: ResponseFactory<Body = S::Stream>,
        S: StreamFactory,
    {
        let from_queue = !self.queue.is_empty();
        let outcome = match self.find_response(request) {
            Some(response) => {
                respond(&self.config, response, request, response_factory, stream_factory)
            }
            None => {
                if self.config.enable_logging {
                    tracing::warn!("No mock response for {} {}", request.method(), request.full_url());
                }
                return Err(TavernError::NoMockResponse {
                    method: request.method().to_string(),
                    url: request.full_url(),
                });
            }
        };

        if let Err(err) = &outcome {
            if !err.is_simulated() {
                return outcome;
            }
        }
        if from_queue {
            self.queue.pop_front();
        }
        self.recorded.push(request.clone());
        outcome
    }

    /// Requests sent so far, oldest first
    pub fn recorded_requests(&self) -> &[PendingRequest] {
        &self.recorded
    }

    /// Number of requests sent so far
    pub fn recorded_count(&self) -> usize {
        self.recorded.len()
    }

    /// Whether a request matching `pattern` was sent
    pub fn was_sent(&self, pattern: &str) -> Result<bool> {
        let pattern = UrlPattern::new(pattern)?;
        Ok(self
            .recorded
            .iter()
            .any(|request| pattern.matches(&request.full_url())))
    }

    /// Panic unless a request matching `pattern` was sent
    pub fn assert_sent(&self, pattern: &str) {
        match self.was_sent(pattern) {
            Ok(true) => {}
            Ok(false) => panic!("Expected a request matching {pattern} to be sent"),
            Err(e) => panic!("{e}"),
        }
    }

    /// Panic if a request matching `pattern` was sent
    pub fn assert_not_sent(&self, pattern: &str) {
        match self.was_sent(pattern) {
            Ok(false) => {}
            Ok(true) => panic!("Unexpected request matching {pattern} was sent"),
            Err(e) => panic!("{e}"),
        }
    }

    /// Panic unless exactly `count` requests were sent
    pub fn assert_sent_count(&self, count: usize) {
        assert_eq!(
            self.recorded_count(),
            count,
            "Expected {} requests to be sent, got {}",
            count,
            self.recorded_count()
        );
    }

    /// Panic if anything was sent
    pub fn assert_nothing_sent(&self) {
        self.assert_sent_count(0);
    }
}

impl Conditionable for MockClient {}

fn respond<R, S>(
    config: &MockConfig,
    response: &MockResponse,
    request: &PendingRequest,
    response_factory: &R,
    stream_factory: &S,
) -> Result<R::Response>
where
    R: ResponseFactory<Body = S::Stream>,
    S: StreamFactory,
{
    if response.throws_exception() {
        if let Some(failure) = response.get_exception(request) {
            if config.enable_logging {
                tracing::debug!(
                    "Simulating failure for {} {}: {}",
                    request.method(),
                    request.full_url(),
                    failure
                );
            }
            return Err(TavernError::Simulated(failure));
        }
    }

    if config.enable_logging {
        tracing::trace!(
            "Faked {} {} with status {}",
            request.method(),
            request.full_url(),
            response.status()
        );
    }
    response.create_response(response_factory, stream_factory)
}
