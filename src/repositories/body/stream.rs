//! Body repository backed by a seekable byte stream.

use super::handle::StreamHandle;
use super::payload::Payload;
use super::BodyRepository;
use crate::error::{Result, TavernError};
use crate::repositories::Conditionable;
use bytes::Bytes;
use serde_json::Value;

/// Holds either nothing or a [`StreamHandle`].
///
/// Construction and [`set`](StreamBodyRepository::set) accept only empty values,
/// raw readable resources (wrapped on the way in) and existing handles; text and
/// structured payloads are rejected with [`TavernError::InvalidArgument`].
///
/// Converting the body to bytes or a string reads from the stream's current
/// position to the end and then rewinds it to offset 0, so the stream stays usable
/// for the next reader.
///
/// # Examples
///
/// ```
/// use tavern_http::{BodyRepository, StreamBodyRepository, StreamHandle};
///
/// let body = StreamBodyRepository::new(StreamHandle::memory("Howdy")).unwrap();
/// let stream = body.get().unwrap().clone();
///
/// assert_eq!(body.contents().unwrap(), "Howdy");
/// assert_eq!(stream.read_to_end().unwrap(), b"Howdy");
///
/// assert!(StreamBodyRepository::new("Howdy").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamBodyRepository {
    value: Option<StreamHandle>,
}

impl StreamBodyRepository {
    /// Create a repository from an empty value, a resource or a stream handle
    pub fn new(value: impl Into<Payload>) -> Result<Self> {
        Ok(StreamBodyRepository {
            value: Self::normalize(value.into())?,
        })
    }

    /// Create an empty repository
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the held stream. Validation matches [`new`](StreamBodyRepository::new).
    pub fn set(&mut self, value: impl Into<Payload>) -> Result<&mut Self> {
        self.value = Self::normalize(value.into())?;
        Ok(self)
    }

    /// The held stream, if any. Never touches the stream.
    pub fn all(&self) -> Option<&StreamHandle> {
        self.value.as_ref()
    }

    /// The held stream, failing with [`TavernError::EmptyBody`] when there is none
    pub fn get(&self) -> Result<&StreamHandle> {
        self.value.as_ref().ok_or(TavernError::EmptyBody)
    }

    fn normalize(payload: Payload) -> Result<Option<StreamHandle>> {
        match payload {
            Payload::Null | Payload::Structured(Value::Null) => Ok(None),
            Payload::Resource(resource) => Ok(Some(StreamHandle::from_boxed(resource))),
            Payload::Stream(handle) => Ok(Some(handle)),
            other @ (Payload::Text(_) | Payload::Structured(_)) => {
                Err(TavernError::invalid_argument(format!(
                    "The value must be a readable stream or null, {} given",
                    other.kind()
                )))
            }
        }
    }
}

impl BodyRepository for StreamBodyRepository {
    fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    fn to_bytes(&self) -> Result<Bytes> {
        match &self.value {
            None => Ok(Bytes::new()),
            Some(stream) => Ok(stream.read_remaining_and_rewind()?),
        }
    }
}

impl Conditionable for StreamBodyRepository {}
