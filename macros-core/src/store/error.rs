//! Data store error taxonomy.

use thiserror::Error;

use super::kv::StoreError;

pub type DataStoreResult<T> = Result<T, DataStoreError>;

/// Errors surfaced by [`DataStore`](super::DataStore) operations.
///
/// Nothing is retried and nothing is swallowed; a failed operation
/// leaves no partial multi-key writes behind.
#[derive(Error, Debug)]
pub enum DataStoreError {
    /// A scoped operation ran before `connect()` or after `disconnect()`.
    #[error("data store is not connected")]
    NotConnected,

    /// Connected but no current user resolved. Indicates an invariant
    /// violation; should not happen after a successful connect.
    #[error("no current user is set")]
    NoCurrentUser,

    #[error("user not found: {0}")]
    UserNotFound(String),

    /// A stored value failed to deserialize. The record is left in
    /// place for inspection.
    #[error("corrupt record at '{key}': {source}")]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize record for '{key}': {source}")]
    SerializeRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A key-value store operation failed, with the key and operation
    /// that hit it.
    #[error("store {op} failed for '{key}': {source}")]
    Store {
        op: &'static str,
        key: String,
        #[source]
        source: StoreError,
    },

    /// `connect()` could not bring the session up. The session is left
    /// unconnected.
    #[error("failed to connect: {0}")]
    Connection(#[source] Box<DataStoreError>),
}
