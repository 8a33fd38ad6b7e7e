//! Key-value persistence
//!
//! Every entity collection is one JSON document under one key. Backends only
//! move strings around; [`Storage`] adds the key prefix and serde.

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix applied to every key the application writes
pub const KEY_PREFIX: &str = "tarifario360_";

/// Logical keys
pub mod keys {
    pub const CATEGORIES: &str = "categories";
    pub const PROMOTIONS: &str = "promotions";
    pub const CONFIG: &str = "config";
    pub const QUICK_QUOTE_HISTORY: &str = "quickQuoteHistory";
    pub const OFFICIAL_QUOTES: &str = "officialQuotes";
    pub const SHIFT_CONFIG: &str = "shiftConfig";
}

/// Synchronous string store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
    /// Remove every key starting with `prefix`, returning how many went away
    fn clear_prefix(&self, prefix: &str) -> AppResult<usize>;
    fn keys(&self) -> AppResult<Vec<String>>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-process store, used by tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn clear_prefix(&self, prefix: &str) -> AppResult<usize> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|k, _| !k.starts_with(prefix));
        Ok(before - entries.len())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// One `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the store directory
    pub fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        tracing::debug!(dir = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        // Write then rename so a crash never leaves half a document behind
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| AppError::storage(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn clear_prefix(&self, prefix: &str) -> AppResult<usize> {
        let mut removed = 0;
        for key in self.keys()? {
            if key.starts_with(prefix) {
                self.remove(&key)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            AppError::storage(format!("Failed to list {}: {}", self.dir.display(), e))
        })?;
        let mut keys: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                name.strip_suffix(".json").map(str::to_string)
            })
            .collect();
        keys.sort();
        Ok(keys)
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Typed, prefixed access to a [`KeyValueStore`]
pub struct Storage {
    backend: Box<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn open_dir(dir: impl Into<PathBuf>) -> AppResult<Self> {
        Ok(Self::new(FileStore::open(dir)?))
    }

    fn full_key(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }

    /// Read and decode a document; `None` when the key was never written
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let Some(raw) = self.backend.get(&Self::full_key(key))? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            AppError::storage(format!("Stored document '{}' is corrupt: {}", key, e))
                .with_detail("key", key)
        })
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(&Self::full_key(key), &raw)?;
        tracing::debug!(key, bytes = raw.len(), "Stored document");
        Ok(())
    }

    pub fn remove(&self, key: &str) -> AppResult<()> {
        self.backend.remove(&Self::full_key(key))
    }

    /// Drop every application key, leaving foreign keys alone
    pub fn clear(&self) -> AppResult<usize> {
        let removed = self.backend.clear_prefix(KEY_PREFIX)?;
        tracing::info!(removed, "Cleared application storage");
        Ok(removed)
    }

    /// Application keys without the prefix
    pub fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter_map(|k| k.strip_prefix(KEY_PREFIX).map(str::to_string))
            .collect())
    }
}
