//! The closed set of values a body can be built from.

use super::handle::{SeekableRead, StreamHandle};
use bytes::Bytes;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::Cursor;

/// Any value a caller may hand to a body repository or to
/// [`MockResponse::make`](crate::MockResponse::make).
///
/// Each repository matches on this exhaustively and rejects the variants it cannot
/// hold with [`TavernError::InvalidArgument`](crate::TavernError::InvalidArgument).
pub enum Payload {
    /// No value
    Null,
    /// Raw text
    Text(String),
    /// Structured data: objects and lists, but also bare numbers and booleans
    Structured(Value),
    /// A raw readable resource that has not been wrapped yet
    Resource(Box<dyn SeekableRead>),
    /// An existing stream handle
    Stream(StreamHandle),
}

impl Payload {
    /// Wrap any readable, seekable resource
    pub fn resource<R: SeekableRead + 'static>(resource: R) -> Self {
        Payload::Resource(Box::new(resource))
    }

    /// Human readable name of the payload kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Null => "null",
            Payload::Text(_) => "string",
            Payload::Structured(value) => match value {
                Value::Null => "null",
                Value::Bool(_) => "boolean",
                Value::Number(n) if n.is_f64() => "float",
                Value::Number(_) => "integer",
                Value::String(_) => "string",
                Value::Array(_) => "array",
                Value::Object(_) => "object",
            },
            Payload::Resource(_) => "resource",
            Payload::Stream(_) => "stream",
        }
    }

    /// True for `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Null)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Null => f.write_str("Null"),
            Payload::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Payload::Structured(value) => f.debug_tuple("Structured").field(value).finish(),
            Payload::Resource(_) => f.write_str("Resource(..)"),
            Payload::Stream(handle) => f.debug_tuple("Stream").field(handle).finish(),
        }
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::Null
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(value: Option<T>) -> Self {
        value.map_or(Payload::Null, Into::into)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<i64> for Payload {
    fn from(n: i64) -> Self {
        Payload::Structured(Value::from(n))
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Payload::Structured(Value::Bool(b))
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Null,
            value => Payload::Structured(value),
        }
    }
}

impl From<StreamHandle> for Payload {
    fn from(handle: StreamHandle) -> Self {
        Payload::Stream(handle)
    }
}

impl From<File> for Payload {
    fn from(file: File) -> Self {
        Payload::resource(file)
    }
}

impl From<Cursor<Vec<u8>>> for Payload {
    fn from(cursor: Cursor<Vec<u8>>) -> Self {
        Payload::resource(cursor)
    }
}

impl From<Cursor<Bytes>> for Payload {
    fn from(cursor: Cursor<Bytes>) -> Self {
        Payload::resource(cursor)
    }
}
