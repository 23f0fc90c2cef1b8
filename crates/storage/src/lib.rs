//! Storage abstraction and implementations for learnpath.
//!
//! Storage is a flat string key-value store, the same shape as a browser's
//! local storage. Callers own the encoding of the values.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
