//! Data containers: the key/value store, body repositories and the shared
//! conditional helper.

mod array_store;
pub mod body;
mod conditionable;

pub use array_store::ArrayStore;
pub use conditionable::Conditionable;
