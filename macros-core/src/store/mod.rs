//! The local data layer: an async key-value store abstraction, the key
//! namespace, entity codecs, and the [`DataStore`] façade on top.

mod codec;
mod data_store;
mod error;
mod file_store;
pub mod keys;
mod kv;

pub use data_store::{DataStore, Loaded};
pub use error::{DataStoreError, DataStoreResult};
pub use file_store::FileStore;
pub use kv::{KeyValueStore, MemoryStore, StoreError};
