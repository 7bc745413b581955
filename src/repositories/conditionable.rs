//! Conditional execution helper shared by every repository type.

/// Run a mutation only when a condition holds.
///
/// Implemented by [`ArrayStore`](crate::ArrayStore), the body repositories and
/// [`MockClient`](crate::MockClient) so that optional configuration reads as one chain.
///
/// # Examples
///
/// ```
/// use tavern_http::{ArrayStore, Conditionable};
///
/// let mut headers = ArrayStore::new();
/// headers
///     .when(true, |h| { h.add("Accept", "application/json"); })
///     .unless(true, |h| { h.add("X-Skipped", "1"); });
///
/// assert_eq!(headers.get("Accept"), Some("application/json"));
/// assert!(headers.get("X-Skipped").is_none());
/// ```
pub trait Conditionable: Sized {
    /// Invoke `callback` with `self` if `condition` is true, otherwise do nothing.
    fn when<F>(&mut self, condition: bool, callback: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        if condition {
            callback(self);
        }
        self
    }

    /// Invoke `callback` with `self` if `condition` is false.
    fn unless<F>(&mut self, condition: bool, callback: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.when(!condition, callback)
    }

    /// Fallible form of [`when`](Conditionable::when); the callback's error is returned.
    fn try_when<F, E>(&mut self, condition: bool, callback: F) -> Result<&mut Self, E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        if condition {
            callback(self)?;
        }
        Ok(self)
    }
}
