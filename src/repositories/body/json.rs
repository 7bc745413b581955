//! Structured body encoded as JSON.

use super::BodyRepository;
use crate::error::{Result, TavernError};
use crate::repositories::Conditionable;
use bytes::Bytes;
use serde_json::{Map, Value};

/// JSON object or list body.
///
/// Bare scalars (numbers, booleans, strings) are rejected; they belong in a
/// [`StringBodyRepository`](super::StringBodyRepository).
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tavern_http::{BodyRepository, JsonBodyRepository};
///
/// let mut body = JsonBodyRepository::default();
/// body.add("name", "Sam").unwrap();
///
/// assert_eq!(body.get("name"), Some(&json!("Sam")));
/// assert_eq!(body.contents().unwrap(), r#"{"name":"Sam"}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBodyRepository {
    value: Value,
}

impl Default for JsonBodyRepository {
    fn default() -> Self {
        JsonBodyRepository {
            value: Value::Object(Map::new()),
        }
    }
}

impl JsonBodyRepository {
    /// Create a body from an object, a list or null
    pub fn new(value: impl Into<Value>) -> Result<Self> {
        Ok(JsonBodyRepository {
            value: Self::validate(value.into())?,
        })
    }

    /// Replace the whole value
    pub fn set(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.value = Self::validate(value.into())?;
        Ok(self)
    }

    /// The raw value
    pub fn all(&self) -> &Value {
        &self.value
    }

    /// Look up a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.as_object().and_then(|map| map.get(key))
    }

    /// Insert a top-level key. An empty body becomes an object first.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<&mut Self> {
        self.object_mut()?.insert(key.into(), value.into());
        Ok(self)
    }

    /// Remove a top-level key if present
    pub fn remove(&mut self, key: &str) -> &mut Self {
        if let Some(map) = self.value.as_object_mut() {
            map.remove(key);
        }
        self
    }

    /// Insert every key of `other`, which must be an object
    pub fn merge(&mut self, other: Value) -> Result<&mut Self> {
        let Value::Object(entries) = other else {
            return Err(TavernError::invalid_argument(
                "Only JSON objects can be merged into a JSON body",
            ));
        };
        let map = self.object_mut()?;
        for (key, value) in entries {
            map.insert(key, value);
        }
        Ok(self)
    }

    fn object_mut(&mut self) -> Result<&mut Map<String, Value>> {
        if self.is_empty() {
            self.value = Value::Object(Map::new());
        }
        self.value.as_object_mut().ok_or_else(|| {
            TavernError::invalid_argument("Keys can only be added to a JSON object body")
        })
    }

    fn validate(value: Value) -> Result<Value> {
        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => Ok(value),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Err(
                TavernError::invalid_argument("A JSON body must be an object, a list or null"),
            ),
        }
    }
}

impl BodyRepository for JsonBodyRepository {
    fn is_empty(&self) -> bool {
        match &self.value {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    fn to_bytes(&self) -> Result<Bytes> {
        if self.value.is_null() {
            return Ok(Bytes::new());
        }
        Ok(Bytes::from(serde_json::to_vec(&self.value)?))
    }
}

impl Conditionable for JsonBodyRepository {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_shapes() {
        assert!(JsonBodyRepository::default().is_empty());
        assert!(JsonBodyRepository::new(json!([])).unwrap().is_empty());
        assert!(JsonBodyRepository::new(Value::Null).unwrap().is_empty());
        assert!(JsonBodyRepository::new(json!([1])).unwrap().is_not_empty());
    }

    #[test]
    fn test_rejects_scalars() {
        assert!(JsonBodyRepository::new(json!(1)).is_err());
        assert!(JsonBodyRepository::new(json!("text")).is_err());

        let mut body = JsonBodyRepository::default();
        assert!(body.set(json!(true)).is_err());
    }

    #[test]
    fn test_add_on_empty_list_becomes_object() {
        let mut body = JsonBodyRepository::new(json!([])).unwrap();
        body.add("id", 7).unwrap();
        assert_eq!(body.all(), &json!({"id": 7}));
    }

    #[test]
    fn test_add_on_list_fails() {
        let mut body = JsonBodyRepository::new(json!([1, 2])).unwrap();
        assert!(body.add("id", 7).is_err());
    }

    #[test]
    fn test_merge_and_remove() {
        let mut body = JsonBodyRepository::new(json!({"a": 1})).unwrap();
        body.merge(json!({"b": 2, "a": 3})).unwrap();
        body.remove("b");
        assert_eq!(body.all(), &json!({"a": 3}));
        assert!(body.merge(json!([1])).is_err());
    }

    #[test]
    fn test_conversion() {
        let body = JsonBodyRepository::new(json!({"name": "Sam"})).unwrap();
        assert_eq!(body.contents().unwrap(), r#"{"name":"Sam"}"#);
        assert_eq!(JsonBodyRepository::default().contents().unwrap(), "{}");
        assert_eq!(JsonBodyRepository::new(Value::Null).unwrap().contents().unwrap(), "");
    }
}
