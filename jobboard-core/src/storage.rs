//! Key-value persistence capability
//!
//! The session layer persists a single record under a fixed key. Two
//! backends are provided: an in-memory map standing in for browser storage,
//! and a directory of JSON files for durable local use.

use crate::config::{StorageBackend, StorageConfig};
use crate::error::{ErrorContext, JobBoardError, JobBoardResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// String key-value store consumed by the session layer
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> JobBoardResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> JobBoardResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> JobBoardResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> JobBoardResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> JobBoardResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> JobBoardResult<()> {
        (**self).remove(key)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> JobBoardResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> JobBoardResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> JobBoardResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store keeping one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    storage_dir: PathBuf,
}

impl FileStore {
    /// Create a file store, creating the directory if it doesn't exist
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> JobBoardResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&storage_dir).map_err(|e| JobBoardError::Storage {
            message: format!(
                "Failed to create storage directory {}: {}",
                storage_dir.display(),
                e
            ),
            source: Some(Box::new(e)),
            context: ErrorContext::new("file_store")
                .with_operation("create_dir")
                .with_suggestion("Check if the parent directory is writable"),
        })?;

        info!("File store initialized at: {}", storage_dir.display());
        Ok(Self { storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn entry_path(&self, key: &str) -> JobBoardResult<PathBuf> {
        if !is_valid_key(key) {
            return Err(JobBoardError::Validation {
                message: format!("Invalid storage key: {:?}", key),
                field: Some("key".to_string()),
                context: ErrorContext::new("file_store")
                    .with_suggestion("Use only letters, digits, '-' and '_' in keys"),
            });
        }
        Ok(self.storage_dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> JobBoardResult<Option<String>> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let value = std::fs::read_to_string(&path)?;
        debug!("Read key {} from {}", key, path.display());
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> JobBoardResult<()> {
        let path = self.entry_path(key)?;
        std::fs::write(&path, value).map_err(|e| JobBoardError::Storage {
            message: format!("Failed to write {}: {}", path.display(), e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("file_store")
                .with_operation("write")
                .with_metadata("key", key),
        })?;

        debug!("Wrote key {} to {}", key, path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> JobBoardResult<()> {
        let path = self.entry_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed key {}", key);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(JobBoardError::Storage {
                message: format!("Failed to remove {}: {}", path.display(), e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("file_store")
                    .with_operation("remove")
                    .with_metadata("key", key),
            }),
        }
    }
}

/// Keys are limited to `[A-Za-z0-9_-]` so they map onto file names safely
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Open the backend selected by configuration
pub fn open_store(config: &StorageConfig) -> JobBoardResult<Box<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StorageBackend::File => Ok(Box::new(FileStore::new(&config.data_dir)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("user").unwrap(), None);

        store.set("user", "{}").unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.len(), 1);

        store.remove("user").unwrap();
        store.remove("user").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("kv")).unwrap();

        store.set("user", r#"{"id":"1"}"#).unwrap();
        assert!(temp_dir.path().join("kv").join("user.json").exists());

        let reopened = FileStore::new(temp_dir.path().join("kv")).unwrap();
        assert_eq!(
            reopened.get("user").unwrap().as_deref(),
            Some(r#"{"id":"1"}"#)
        );

        store.remove("user").unwrap();
        assert_eq!(store.get("user").unwrap(), None);
        store.remove("user").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path()).unwrap();

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
        assert!(is_valid_key("session_v1"));
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
