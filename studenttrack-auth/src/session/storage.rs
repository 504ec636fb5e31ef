//! Session Storage - Key-value persistence for the signed-in user
//!
//! Stands in for browser local storage: string values under string keys,
//! read and written synchronously.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use studenttrack_core::{storage_error, TrackResult};
use tracing::{debug, info};

/// Key-value store holding serialized session data
pub trait SessionStorage: Send + Sync {
    /// Read the value under `key`, `None` if absent
    fn get(&self, key: &str) -> TrackResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> TrackResult<()>;

    /// Remove `key`; removing a missing key succeeds
    fn remove(&self, key: &str) -> TrackResult<()>;
}

/// In-process storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> TrackResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| storage_error!("Memory storage lock poisoned", "memory_storage"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TrackResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| storage_error!("Memory storage lock poisoned", "memory_storage"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> TrackResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| storage_error!("Memory storage lock poisoned", "memory_storage"))?;
        entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for stored entries
    storage_dir: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `storage_dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> TrackResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&storage_dir).map_err(|e| {
            storage_error!(
                format!("Failed to create storage dir {}", storage_dir.display()),
                "file_storage",
                e
            )
        })?;

        info!("Session storage initialized at: {}", storage_dir.display());

        Ok(Self { storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.storage_dir.join(format!("{}.json", key))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> TrackResult<Option<String>> {
        let path = self.entry_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let data = std::fs::read_to_string(&path).map_err(|e| {
            storage_error!(
                format!("Failed to read {}", path.display()),
                "file_storage",
                e
            )
        })?;

        debug!("Loaded entry {} from {}", key, path.display());
        Ok(Some(data))
    }

    fn set(&self, key: &str, value: &str) -> TrackResult<()> {
        let path = self.entry_path(key);

        std::fs::write(&path, value).map_err(|e| {
            storage_error!(
                format!("Failed to write {}", path.display()),
                "file_storage",
                e
            )
        })?;

        debug!("Saved entry {} to {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> TrackResult<()> {
        let path = self.entry_path(key);

        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                storage_error!(
                    format!("Failed to delete {}", path.display()),
                    "file_storage",
                    e
                )
            })?;
            debug!("Deleted entry file: {}", path.display());
        }

        Ok(())
    }
}
