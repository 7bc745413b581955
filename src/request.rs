//! The in-flight request context handed to exception resolvers.

use crate::error::Result;
use crate::repositories::body::Body;
use crate::repositories::ArrayStore;
use http::Method;
use url::Url;

/// A request that is about to be dispatched.
///
/// The faking core treats it as opaque and only passes it through to exception
/// resolvers; resolvers and [`MockClient`](crate::MockClient) may inspect it.
///
/// # Examples
///
/// ```
/// use tavern_http::PendingRequest;
/// use http::Method;
///
/// let request = PendingRequest::new(Method::POST, "https://api.example.com/users")
///     .unwrap()
///     .with_header("Accept", "application/json")
///     .with_query("page", "2");
///
/// assert_eq!(request.url().path(), "/users");
/// assert_eq!(request.full_url(), "https://api.example.com/users?page=2");
/// ```
#[derive(Debug, Clone)]
pub struct PendingRequest {
    method: Method,
    url: Url,
    headers: ArrayStore,
    query: ArrayStore,
    body: Option<Body>,
}

impl PendingRequest {
    /// Create a request for `url`
    pub fn new(method: Method, url: &str) -> Result<Self> {
        Ok(PendingRequest {
            method,
            url: Url::parse(url)?,
            headers: ArrayStore::new(),
            query: ArrayStore::new(),
            body: None,
        })
    }

    /// GET request for `url`
    pub fn get(url: &str) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(name, value);
        self
    }

    /// Add a query parameter
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(name, value);
        self
    }

    /// Attach a body
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Request method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Base URL without the extra query parameters
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers
    pub fn headers(&self) -> &ArrayStore {
        &self.headers
    }

    /// Extra query parameters
    pub fn query(&self) -> &ArrayStore {
        &self.query
    }

    /// Request body, if any
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// URL with the extra query parameters appended
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.to_string();
        }
        let mut url = self.url.clone();
        url.query_pairs_mut().extend_pairs(self.query.iter());
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::body::StringBodyRepository;

    #[test]
    fn test_full_url_keeps_existing_query() {
        let request = PendingRequest::get("https://example.com/search?q=rust")
            .unwrap()
            .with_query("page", "1");
        assert_eq!(request.full_url(), "https://example.com/search?q=rust&page=1");
    }

    #[test]
    fn test_invalid_url() {
        assert!(PendingRequest::get("not a url").is_err());
    }

    #[test]
    fn test_body_attached() {
        let request = PendingRequest::new(Method::PUT, "https://example.com/doc")
            .unwrap()
            .with_body(StringBodyRepository::new("payload"));
        assert!(request.body().is_some());
        assert_eq!(request.method(), &Method::PUT);
    }
}
