//! Store management: opening the configured backend, shared access and the writer actor.

pub mod collection;
pub mod store;
pub mod write_actor;

use std::sync::{Arc, RwLock, RwLockReadGuard};

use log::info;
use obra_core::Result;

use crate::config::{StorageBackend, StorageConfig};
use crate::errors::StorageError;

pub use collection::{record_id, record_project_id, Collection};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreChanges};
pub use write_actor::{spawn_writer, StoreTransaction, WriteHandle};

/// Shared handle to the store. Readers take the read lock, the writer actor
/// takes the write lock for the duration of one job.
pub type StorePool = Arc<RwLock<Box<dyn KeyValueStore>>>;

/// Opens the store selected by `config`.
pub fn init(config: &StorageConfig) -> Result<StorePool> {
    let store: Box<dyn KeyValueStore> = match &config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store");
            Box::new(MemoryStore::new())
        }
        StorageBackend::File(_) => {
            let path = config
                .store_path()
                .ok_or_else(|| obra_core::Error::MissingConfigKey("data directory".to_string()))?;
            Box::new(FileStore::open(path)?)
        }
    };
    Ok(create_pool(store))
}

pub fn create_pool(store: Box<dyn KeyValueStore>) -> StorePool {
    Arc::new(RwLock::new(store))
}

fn read_guard(pool: &StorePool) -> Result<RwLockReadGuard<'_, Box<dyn KeyValueStore>>> {
    pool.read().map_err(|_| StorageError::LockPoisoned.into())
}

/// Reads a key outside any transaction, falling back to its legacy spelling.
pub fn read_value(pool: &StorePool, key: &str) -> Result<Option<String>> {
    let store = read_guard(pool)?;
    StoreTransaction::new(&**store).get_with_legacy(key)
}

pub fn read_collection(pool: &StorePool, key: &str) -> Result<Collection> {
    let store = read_guard(pool)?;
    StoreTransaction::new(&**store).load_collection(key)
}

pub fn read_pointer(pool: &StorePool, key: &str) -> Result<Option<String>> {
    let store = read_guard(pool)?;
    StoreTransaction::new(&**store).get_pointer(key)
}
