//! The fake response contract and exception rules.

use super::factory::{ResponseFactory, StreamFactory};
use crate::error::{Result, SimulatedFailure};
use crate::repositories::body::{Body, BodyRepository};
use crate::repositories::ArrayStore;
use crate::request::PendingRequest;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Resolver deciding at dispatch time whether, and with what, a request fails
pub type ExceptionResolver =
    Arc<dyn Fn(&PendingRequest) -> Option<SimulatedFailure> + Send + Sync + 'static>;

/// Wrap any error as a [`SimulatedFailure`]
pub fn simulated<E>(error: E) -> SimulatedFailure
where
    E: Error + Send + Sync + 'static,
{
    Arc::new(error)
}

/// What a fake response should fail with.
///
/// # Examples
///
/// ```
/// use tavern_http::{simulated, ExceptionRule, PendingRequest};
/// use std::io;
///
/// let rule = ExceptionRule::resolver(|request: &PendingRequest| {
///     (request.url().path() == "/flaky")
///         .then(|| simulated(io::Error::new(io::ErrorKind::TimedOut, "timed out")))
/// });
///
/// let flaky = PendingRequest::get("https://example.com/flaky").unwrap();
/// let stable = PendingRequest::get("https://example.com/stable").unwrap();
/// assert!(rule.resolve(&flaky).is_some());
/// assert!(rule.resolve(&stable).is_none());
/// ```
#[derive(Clone)]
pub enum ExceptionRule {
    /// Always fail with this exact failure
    Literal(SimulatedFailure),
    /// Ask the resolver; `None` means the request goes through after all
    Resolver(ExceptionResolver),
}

impl ExceptionRule {
    /// Rule that always fails with `error`
    pub fn literal<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        ExceptionRule::Literal(simulated(error))
    }

    /// Rule that fails with a plain message
    pub fn message(message: impl Into<String>) -> Self {
        Self::from_anyhow(anyhow::Error::msg(message.into()))
    }

    /// Rule that always fails with an [`anyhow::Error`]
    pub fn from_anyhow(error: anyhow::Error) -> Self {
        let boxed: Box<dyn Error + Send + Sync + 'static> = error.into();
        ExceptionRule::Literal(Arc::from(boxed))
    }

    /// Rule computed from the pending request
    pub fn resolver<F>(resolver: F) -> Self
    where
        F: Fn(&PendingRequest) -> Option<SimulatedFailure> + Send + Sync + 'static,
    {
        ExceptionRule::Resolver(Arc::new(resolver))
    }

    /// Resolve the rule against `pending_request`
    pub fn resolve(&self, pending_request: &PendingRequest) -> Option<SimulatedFailure> {
        match self {
            ExceptionRule::Literal(failure) => Some(Arc::clone(failure)),
            ExceptionRule::Resolver(resolver) => resolver(pending_request),
        }
    }
}

impl From<SimulatedFailure> for ExceptionRule {
    fn from(failure: SimulatedFailure) -> Self {
        ExceptionRule::Literal(failure)
    }
}

impl fmt::Debug for ExceptionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExceptionRule::Literal(failure) => {
                f.debug_tuple("Literal").field(&failure.to_string()).finish()
            }
            ExceptionRule::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// A caller-configured stand-in for a real HTTP response.
///
/// A fake response is either in the "no exception configured" state or, after
/// [`throw`](FakeResponse::throw), in the "exception configured" state. There is no
/// way back; further `throw` calls replace the rule.
pub trait FakeResponse {
    /// HTTP status code, as configured
    fn status(&self) -> u16;

    /// Response headers
    fn headers(&self) -> &ArrayStore;

    /// Response body
    fn body(&self) -> &Body;

    /// Attach or replace the exception rule. Returns the same instance.
    fn throw(&mut self, rule: impl Into<ExceptionRule>) -> &mut Self
    where
        Self: Sized;

    /// The stored exception rule, if any
    fn exception_rule(&self) -> Option<&ExceptionRule>;

    /// True iff an exception rule is stored, whatever the status code
    fn throws_exception(&self) -> bool {
        self.exception_rule().is_some()
    }

    /// Resolve the stored rule against `pending_request`.
    ///
    /// Returns `None` when no rule is stored or a resolver declines to fail.
    fn get_exception(&self, pending_request: &PendingRequest) -> Option<SimulatedFailure> {
        self.exception_rule()
            .and_then(|rule| rule.resolve(pending_request))
    }

    /// Convert into a wire-level response using the given factories
    fn create_response<R, S>(&self, response_factory: &R, stream_factory: &S) -> Result<R::Response>
    where
        Self: Sized,
        R: ResponseFactory<Body = S::Stream>,
        S: StreamFactory,
    {
        let stream = stream_factory.create_stream(self.body().to_bytes()?);
        response_factory.create_response(self.status(), self.headers(), stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn request(path: &str) -> PendingRequest {
        PendingRequest::get(&format!("https://example.com{path}")).unwrap()
    }

    #[test]
    fn test_literal_returns_same_instance() {
        let failure = simulated(io::Error::other("boom"));
        let rule = ExceptionRule::from(failure.clone());

        let first = rule.resolve(&request("/")).unwrap();
        let second = rule.resolve(&request("/other")).unwrap();
        assert!(Arc::ptr_eq(&first, &failure));
        assert!(Arc::ptr_eq(&second, &failure));
    }

    #[test]
    fn test_resolver_sees_request() {
        let rule = ExceptionRule::resolver(|request| {
            request
                .headers()
                .get("X-Fail")
                .map(|reason| simulated(io::Error::other(reason.to_string())))
        });

        let failing = request("/").with_header("X-Fail", "upstream down");
        assert_eq!(rule.resolve(&failing).unwrap().to_string(), "upstream down");
        assert!(rule.resolve(&request("/")).is_none());
    }

    #[test]
    fn test_message_rule() {
        let rule = ExceptionRule::message("connection reset");
        assert_eq!(rule.resolve(&request("/")).unwrap().to_string(), "connection reset");
        assert_eq!(format!("{rule:?}"), "Literal(\"connection reset\")");
    }
}
