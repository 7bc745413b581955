#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Tavern: fake HTTP responses and body repositories
//!
//! The data containers and fake-response contract behind an HTTP client SDK's
//! testing story. Requests never leave the process: tests describe the responses
//! they expect and the SDK code under test receives them as if they came from the
//! network.
//!
//! ## Overview
//!
//! - **Body repositories** normalise payloads (streams, text, JSON) behind one
//!   read / empty-check contract. Stream bodies are rewound after every read.
//! - **Fake responses** carry a status, headers, a body and an optional exception
//!   rule resolved against the pending request at dispatch time.
//! - **Fixtures** persist responses as JSON files and replay them by name.
//! - **Mock client** answers pending requests in sequence or by URL pattern and
//!   records what was sent.
//!
//! ## Module Structure
//!
//! - **[repositories]** - ArrayStore, body repositories, conditional helper
//! - **[faking]** - FakeResponse, MockResponse, fixtures, MockClient
//! - **[request]** - PendingRequest context
//! - **[config]** - MockConfig
//! - **[error]** - Error types and result handling

pub mod config;
pub mod error;
pub mod faking;
pub mod repositories;
pub mod request;

pub use config::MockConfig;
pub use error::{Result, SimulatedFailure, TavernError};
pub use faking::{
    simulated, BytesStreamFactory, ExceptionRule, FakeResponse, Fixture, HttpResponseFactory,
    MockClient, MockResponse, RecordedResponse, ResponseFactory, StreamFactory,
};
pub use repositories::body::{
    Body, BodyRepository, JsonBodyRepository, Payload, StreamBodyRepository, StreamHandle,
    StringBodyRepository,
};
pub use repositories::{ArrayStore, Conditionable};
pub use request::PendingRequest;

#[cfg(test)]
mod tests;
