//! Factories turning a fake response into a wire-level response object.
//!
//! [`FakeResponse::create_response`](super::FakeResponse::create_response) only composes
//! the two factories: the stream factory wraps the body bytes, the response factory
//! builds the response around status, headers and that stream.

use crate::error::{Result, TavernError};
use crate::repositories::ArrayStore;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::StatusCode;

/// Produces a stream object from raw body content
pub trait StreamFactory {
    /// Stream type handed to the response factory
    type Stream;

    /// Wrap `content`
    fn create_stream(&self, content: Bytes) -> Self::Stream;
}

/// Produces a response object from status, headers and a body stream
pub trait ResponseFactory {
    /// Body stream type accepted
    type Body;
    /// Response type produced
    type Response;

    /// Build a response
    fn create_response(
        &self,
        status: u16,
        headers: &ArrayStore,
        body: Self::Body,
    ) -> Result<Self::Response>;
}

/// Stream factory that keeps the content as [`Bytes`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesStreamFactory;

impl StreamFactory for BytesStreamFactory {
    type Stream = Bytes;

    fn create_stream(&self, content: Bytes) -> Bytes {
        content
    }
}

/// Response factory producing [`http::Response<Bytes>`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpResponseFactory;

impl ResponseFactory for HttpResponseFactory {
    type Body = Bytes;
    type Response = http::Response<Bytes>;

    fn create_response(
        &self,
        status: u16,
        headers: &ArrayStore,
        body: Bytes,
    ) -> Result<http::Response<Bytes>> {
        let status = StatusCode::from_u16(status).map_err(|_| TavernError::InvalidStatus(status))?;

        let mut response = http::Response::new(body);
        *response.status_mut() = status;

        for (name, value) in headers.iter() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| TavernError::InvalidHeader {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| TavernError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
            response.headers_mut().insert(header_name, header_value);
        }

        Ok(response)
    }
}
