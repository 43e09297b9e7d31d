//! File-backed key-value store: one file per key under a data directory.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use tokio::fs;

use super::kv::{KeyValueStore, StoreError};

/// Durable backend storing each key as a file.
///
/// Keys are escaped into filenames with a reversible percent encoding,
/// so listing the directory recovers the original keys exactly.
#[derive(Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(encode_key(key))
    }

    fn io_err(path: &PathBuf, source: io::Error) -> StoreError {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Escapes anything outside `[A-Za-z0-9._-]` as `%XX`.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{:02x}", byte)),
        }
    }
    out
}

fn decode_key(name: &str) -> Result<String, StoreError> {
    let mut bytes = Vec::with_capacity(name.len());
    let mut chars = name.bytes();
    while let Some(byte) = chars.next() {
        if byte == b'%' {
            let hi = chars.next();
            let lo = chars.next();
            let (Some(hi), Some(lo)) = (hi, lo) else {
                return Err(StoreError::InvalidKey(name.to_string()));
            };
            let hex = [hi, lo];
            let hex = std::str::from_utf8(&hex)
                .map_err(|_| StoreError::InvalidKey(name.to_string()))?;
            let value = u8::from_str_radix(hex, 16)
                .map_err(|_| StoreError::InvalidKey(name.to_string()))?;
            bytes.push(value);
        } else {
            bytes.push(byte);
        }
    }
    String::from_utf8(bytes).map_err(|_| StoreError::InvalidKey(name.to_string()))
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path(key);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_err(&path, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| Self::io_err(&self.data_dir, e))?;

        let path = self.path(key);
        fs::write(&path, value)
            .await
            .map_err(|e| Self::io_err(&path, e))
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(&path, e)),
        }
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let mut dir = match fs::read_dir(&self.data_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_err(&self.data_dir, e)),
        };

        let mut keys = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| Self::io_err(&self.data_dir, e))?
        {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            keys.push(decode_key(&name)?);
        }
        Ok(keys)
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, StoreError> {
        let mut pairs = Vec::with_capacity(keys.len());
        for key in keys {
            pairs.push((key.clone(), self.get(key).await?));
        }
        Ok(pairs)
    }

    async fn multi_remove(&self, keys: &[String]) -> Result<(), StoreError> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}
