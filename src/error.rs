//! Error types for the faking and body-repository layers.
//!
//! Validation failures ([`TavernError::InvalidArgument`]) are raised at the point of
//! invalid input. Simulated failures configured on a fake response are carried in
//! [`TavernError::Simulated`] once a mock client decides to raise them.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// A caller-supplied error standing in for a failed HTTP exchange.
///
/// Shared so that a literal rule hands back the very same instance every time it is
/// resolved.
pub type SimulatedFailure = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for tavern operations
pub type Result<T> = std::result::Result<T, TavernError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum TavernError {
    /// A value of the wrong kind was handed to a repository
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Fixture storage root does not exist
    #[error("The directory \"{}\" does not exist or is not a valid directory.", .path.display())]
    DirectoryNotFound {
        /// The missing directory
        path: PathBuf,
    },

    /// A fixture was required but has not been recorded
    #[error("Fixture \"{name}\" is missing and missing fixtures are not allowed")]
    FixtureMissing {
        /// Fixture name
        name: String,
    },

    /// `get()` was called on an empty body
    #[error("The body is empty")]
    EmptyBody,

    /// Status code outside 100..=999
    #[error("Invalid status code: {0}")]
    InvalidStatus(u16),

    /// Header name or value rejected by the response factory
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader {
        /// Header name as supplied
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// The mock client had nothing to answer a request with
    #[error("No mock response found for {method} {url}")]
    NoMockResponse {
        /// Request method
        method: String,
        /// Request URL
        url: String,
    },

    /// A fake response was configured to fail
    #[error("Simulated failure: {0}")]
    Simulated(SimulatedFailure),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Body is not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Fixture data could not be decoded
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl TavernError {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TavernError::InvalidArgument(msg.into())
    }

    /// Create a directory not found error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        TavernError::DirectoryNotFound { path: path.into() }
    }

    /// Check if this error was raised by input validation
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            TavernError::InvalidArgument(_)
                | TavernError::InvalidStatus(_)
                | TavernError::InvalidHeader { .. }
        )
    }

    /// Check if this error is a simulated failure from a fake response
    pub fn is_simulated(&self) -> bool {
        matches!(self, TavernError::Simulated(_))
    }

    /// The simulated failure, if this is one
    pub fn simulated(&self) -> Option<&SimulatedFailure> {
        match self {
            TavernError::Simulated(failure) => Some(failure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_message() {
        let err = TavernError::directory_not_found("/nope/fixtures");
        assert_eq!(
            err.to_string(),
            "The directory \"/nope/fixtures\" does not exist or is not a valid directory."
        );
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_classification() {
        assert!(TavernError::invalid_argument("x").is_validation_error());
        assert!(TavernError::InvalidStatus(42).is_validation_error());

        let failure: SimulatedFailure = Arc::new(std::io::Error::other("boom"));
        let err = TavernError::Simulated(failure.clone());
        assert!(err.is_simulated());
        assert!(Arc::ptr_eq(err.simulated().unwrap(), &failure));
    }
}
