//! Body repositories: uniform storage for request and response payloads.
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BodyRepository`] | Read / empty-check contract shared by every body |
//! | [`StreamBodyRepository`] | Optional seekable stream, rewound after every read |
//! | [`StringBodyRepository`] | Raw text |
//! | [`JsonBodyRepository`] | Structured data encoded as JSON |
//! | [`Body`] | Closed set of the three, as held by a fake response |
//! | [`Payload`] | Every value a body can be built from |
//!
//! # Encoding policy
//!
//! [`Body::from_payload`] picks the repository for a payload:
//!
//! | Payload | Repository |
//! |---------|------------|
//! | `Null` (including JSON `null`), `Text` | [`StringBodyRepository`] |
//! | `Structured` object / list | [`JsonBodyRepository`] |
//! | `Resource`, `Stream` | [`StreamBodyRepository`] |
//!
//! Structured scalars (numbers, booleans) are rejected.

mod handle;
mod json;
mod payload;
mod stream;
mod string;

pub use handle::{SeekableRead, StreamHandle};
pub use json::JsonBodyRepository;
pub use payload::Payload;
pub use stream::StreamBodyRepository;
pub use string::StringBodyRepository;

use crate::error::Result;
use bytes::Bytes;
use serde_json::Value;

/// Contract shared by every body representation.
///
/// The raw accessor `all()` lives on each concrete repository, since its return type
/// differs per variant (`&str`, `&Value`, `Option<&StreamHandle>`). Keeping it off the
/// trait keeps `dyn BodyRepository` usable.
pub trait BodyRepository {
    /// True when the body holds nothing
    fn is_empty(&self) -> bool;

    /// Exact complement of [`is_empty`](BodyRepository::is_empty)
    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// The body's content as raw bytes. An empty body yields no bytes.
    fn to_bytes(&self) -> Result<Bytes>;

    /// The body's content as UTF-8 text
    fn contents(&self) -> Result<String> {
        Ok(String::from_utf8(self.to_bytes()?.to_vec())?)
    }
}

/// The body held by a fake response.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Raw text
    String(StringBodyRepository),
    /// Structured JSON
    Json(JsonBodyRepository),
    /// Seekable stream
    Stream(StreamBodyRepository),
}

impl Body {
    /// Choose a repository for `payload` following the module's encoding policy
    pub fn from_payload(payload: impl Into<Payload>) -> Result<Self> {
        let body = match payload.into() {
            Payload::Null | Payload::Structured(Value::Null) => {
                Body::String(StringBodyRepository::default())
            }
            Payload::Text(text) => Body::String(StringBodyRepository::new(text)),
            Payload::Structured(value) => Body::Json(JsonBodyRepository::new(value)?),
            stream @ (Payload::Resource(_) | Payload::Stream(_)) => {
                Body::Stream(StreamBodyRepository::new(stream)?)
            }
        };
        Ok(body)
    }

    /// The text repository, if this is one
    pub fn as_string(&self) -> Option<&StringBodyRepository> {
        match self {
            Body::String(body) => Some(body),
            _ => None,
        }
    }

    /// The JSON repository, if this is one
    pub fn as_json(&self) -> Option<&JsonBodyRepository> {
        match self {
            Body::Json(body) => Some(body),
            _ => None,
        }
    }

    /// The stream repository, if this is one
    pub fn as_stream(&self) -> Option<&StreamBodyRepository> {
        match self {
            Body::Stream(body) => Some(body),
            _ => None,
        }
    }

    fn repository(&self) -> &dyn BodyRepository {
        match self {
            Body::String(body) => body,
            Body::Json(body) => body,
            Body::Stream(body) => body,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::String(StringBodyRepository::default())
    }
}

impl BodyRepository for Body {
    fn is_empty(&self) -> bool {
        self.repository().is_empty()
    }

    fn to_bytes(&self) -> Result<Bytes> {
        self.repository().to_bytes()
    }

    fn contents(&self) -> Result<String> {
        self.repository().contents()
    }
}

impl From<StringBodyRepository> for Body {
    fn from(body: StringBodyRepository) -> Self {
        Body::String(body)
    }
}

impl From<JsonBodyRepository> for Body {
    fn from(body: JsonBodyRepository) -> Self {
        Body::Json(body)
    }
}

impl From<StreamBodyRepository> for Body {
    fn from(body: StreamBodyRepository) -> Self {
        Body::Stream(body)
    }
}
