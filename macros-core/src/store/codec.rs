//! Entity codecs: JSON string form of every persisted record.
//!
//! Decode failures are surfaced as corrupt records by the data store,
//! never silently replaced with defaults.

use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}
