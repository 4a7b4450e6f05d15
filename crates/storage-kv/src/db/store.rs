//! Backing stores: a flat map from logical key to JSON text.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use obra_core::Result;

use crate::errors::IntoCore;

/// Pending writes of a transaction. `None` removes the key.
pub type StoreChanges = BTreeMap<String, Option<String>>;

/// A key-value store holding one JSON document per logical key.
///
/// `apply` must be all-or-nothing: either every change lands or none does.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn apply(&mut self, changes: StoreChanges) -> Result<()>;
}

fn merge_changes(entries: &mut BTreeMap<String, String>, changes: StoreChanges) {
    for (key, value) in changes {
        match value {
            Some(value) => {
                entries.insert(key, value);
            }
            None => {
                entries.remove(&key);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with raw entries, e.g. an export of an older installation.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MemoryStore {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, changes: StoreChanges) -> Result<()> {
        merge_changes(&mut self.entries, changes);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
///
/// Writes go to a sibling temp file that is renamed over the store, so a
/// crash mid-write leaves the previous document intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).into_core()?;
        }

        let entries = if path.exists() {
            let text = fs::read_to_string(&path).into_core()?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text).into_core()?
            }
        } else {
            BTreeMap::new()
        };

        info!(
            "Opened store at {} ({} keys)",
            path.display(),
            entries.len()
        );
        Ok(FileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, changes: StoreChanges) -> Result<()> {
        let mut next = self.entries.clone();
        merge_changes(&mut next, changes);

        let text = serde_json::to_string_pretty(&next).into_core()?;
        let temp = self.temp_path();
        fs::write(&temp, text).into_core()?;
        fs::rename(&temp, &self.path).into_core()?;
        debug!("Persisted {} keys to {}", next.len(), self.path.display());

        self.entries = next;
        Ok(())
    }
}
