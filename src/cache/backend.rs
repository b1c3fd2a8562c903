//! Key-value persistence backends for the holiday cache.
//!
//! [`KeyValueStore`] is the seam between the cache and whatever storage the
//! host application provides. Two backends ship with the crate: an
//! in-process [`MemoryStore`] and a directory-backed [`FileStore`].

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Per-process sequence for temp file names.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// String key-value storage.
///
/// Implementations serialize their own reads and writes.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns whether anything was removed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Every key currently stored.
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("Memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

/// On-disk record: the original key travels with the value so that
/// `keys()` does not have to reverse the file name hash.
#[derive(Debug, Serialize, Deserialize)]
struct StoredValue {
    key: String,
    value: String,
}

/// Directory-backed store, one JSON file per key.
pub struct FileStore {
    /// Root directory for stored values.
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create cache directory {:?}", self.root))
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let hash = Sha256::digest(key.as_bytes());
        let hash_str = hex::encode(&hash[..16]);
        self.root.join(format!("{}.json", hash_str))
    }

    fn read_record(path: &Path) -> Result<StoredValue> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cache file {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Malformed cache file {:?}", path))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let record = Self::read_record(&path)?;
        if record.key != key {
            return Ok(None);
        }
        Ok(Some(record.value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let path = self.path_for(key);
        let json = serde_json::to_string(&StoredValue {
            key: key.to_string(),
            value: value.to_string(),
        })?;

        // Write to a temp file and rename so readers never see a partial file.
        // Each write gets its own temp file; writers never share one.
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let temp_path = path.with_extension(format!("json.{}.{}.tmp", std::process::id(), seq));
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write cache file {:?}", temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to move cache file into place at {:?}", path))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).with_context(|| format!("Failed to remove {:?}", path))?;
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();

            if path.extension().is_some_and(|e| e == "json") {
                if let Ok(record) = Self::read_record(&path) {
                    keys.push(record.key);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}
