//! Storage configuration read from the environment.

use std::path::PathBuf;

use obra_core::errors::{Error, Result};

/// File name of the JSON document backing the file store.
pub const STORE_FILE_NAME: &str = "obra-store.json";
pub const STORAGE_BACKEND_ENV: &str = "OBRA_STORAGE";
pub const DATA_DIR_ENV: &str = "OBRA_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Volatile store, lost when the process exits.
    Memory,
    /// JSON document stored under the given data directory.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

impl StorageConfig {
    pub fn memory() -> Self {
        StorageConfig {
            backend: StorageBackend::Memory,
        }
    }

    pub fn file(data_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            backend: StorageBackend::File(data_dir.into()),
        }
    }

    /// Reads `OBRA_STORAGE` (`memory` or `file`, default `file`) and
    /// `OBRA_DATA_DIR` (default `./data`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup(STORAGE_BACKEND_ENV)
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "file".to_string());

        match backend.as_str() {
            "memory" => Ok(Self::memory()),
            "file" => {
                let data_dir = lookup(DATA_DIR_ENV)
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
                Ok(Self::file(data_dir))
            }
            other => Err(Error::InvalidConfigValue(format!(
                "{}={} (expected 'memory' or 'file')",
                STORAGE_BACKEND_ENV, other
            ))),
        }
    }

    /// Path of the store file, `None` for the memory backend.
    pub fn store_path(&self) -> Option<PathBuf> {
        match &self.backend {
            StorageBackend::Memory => None,
            StorageBackend::File(data_dir) => Some(data_dir.join(STORE_FILE_NAME)),
        }
    }
}
