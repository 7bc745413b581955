//! Plain text body.

use super::BodyRepository;
use crate::error::Result;
use crate::repositories::Conditionable;
use bytes::Bytes;

/// Text body. Empty iff the string is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBodyRepository {
    value: String,
}

impl StringBodyRepository {
    /// Create a body from text
    pub fn new(value: impl Into<String>) -> Self {
        StringBodyRepository {
            value: value.into(),
        }
    }

    /// Replace the text
    pub fn set(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = value.into();
        self
    }

    /// The raw text
    pub fn all(&self) -> &str {
        &self.value
    }
}

impl BodyRepository for StringBodyRepository {
    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn to_bytes(&self) -> Result<Bytes> {
        Ok(Bytes::copy_from_slice(self.value.as_bytes()))
    }

    fn contents(&self) -> Result<String> {
        Ok(self.value.clone())
    }
}

impl Conditionable for StringBodyRepository {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_body() {
        let mut body = StringBodyRepository::default();
        assert!(body.is_empty());

        body.set("Howdy");
        assert_eq!(body.all(), "Howdy");
        assert!(body.is_not_empty());
        assert_eq!(body.contents().unwrap(), "Howdy");
        assert_eq!(body.to_bytes().unwrap(), Bytes::from_static(b"Howdy"));
    }
}
