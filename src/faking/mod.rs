//! Fake responses for testing code built on the SDK.
//!
//! This module lets tests answer requests without a network:
//!
//! - **Build fake responses** with a status, headers and any body payload
//! - **Simulate failures** with a fixed error or a resolver that inspects the request
//! - **Replay fixtures** recorded to disk as JSON
//! - **Dispatch** requests through a [`MockClient`] that records what was sent
//!
//! # Module Organization
//!
//! ```text
//! faking/
//! ├── fake_response - FakeResponse contract and exception rules
//! ├── mock_response - MockResponse, the concrete fake response
//! ├── factory       - Response / stream factories for wire-level conversion
//! ├── fixture       - Fixture loading and RecordedResponse file format
//! ├── storage       - Base-directory file storage
//! └── mock_client   - Request dispatch and assertions
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FakeResponse`] | Contract every fake response satisfies |
//! | [`MockResponse`] | Concrete fake response |
//! | [`ExceptionRule`] | Literal failure or resolver |
//! | [`Fixture`] | Named, file-backed fake response |
//! | [`MockClient`] | Answers pending requests with fake responses |
//!
//! # Examples
//!
//! ```
//! use tavern_http::{
//!     simulated, ExceptionRule, FakeResponse, MockResponse, PendingRequest,
//! };
//! use std::io;
//!
//! let mut response = MockResponse::ok("payload").unwrap();
//! response.throw(ExceptionRule::resolver(|request: &PendingRequest| {
//!     request
//!         .headers()
//!         .get("X-Chaos")
//!         .map(|_| simulated(io::Error::other("chaos monkey")))
//! }));
//!
//! let calm = PendingRequest::get("https://example.com").unwrap();
//! let chaotic = calm.clone().with_header("X-Chaos", "1");
//!
//! assert!(response.throws_exception());
//! assert!(response.get_exception(&calm).is_none());
//! assert!(response.get_exception(&chaotic).is_some());
//! ```

mod factory;
mod fake_response;
mod fixture;
mod mock_client;
mod mock_response;
mod storage;

pub use factory::{BytesStreamFactory, HttpResponseFactory, ResponseFactory, StreamFactory};
pub use fake_response::{simulated, ExceptionResolver, ExceptionRule, FakeResponse};
pub use fixture::{DataEncoding, Fixture, RecordedResponse};
pub use mock_client::{MockClient, UrlPattern};
pub use mock_response::MockResponse;
pub use storage::Storage;
