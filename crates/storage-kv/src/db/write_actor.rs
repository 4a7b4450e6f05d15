use super::collection::Collection;
use super::store::{KeyValueStore, StoreChanges};
use super::StorePool;
use crate::errors::StorageError;
use crate::schema::legacy_key;
use log::{debug, error};
use obra_core::errors::Result;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

/// Writes staged by a job. Reads see the staged value first, then the store.
///
/// Nothing reaches the store until the job returns `Ok`; an `Err` discards
/// every staged change.
pub struct StoreTransaction<'a> {
    store: &'a dyn KeyValueStore,
    staged: StoreChanges,
}

impl<'a> StoreTransaction<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        StoreTransaction {
            store,
            staged: StoreChanges::new(),
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match self.staged.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.store.get(key),
        }
    }

    pub fn set(&mut self, key: &str, value: String) {
        self.staged.insert(key.to_string(), Some(value));
    }

    pub fn remove(&mut self, key: &str) {
        self.staged.insert(key.to_string(), None);
    }

    /// Reads a key, falling back to its legacy spelling when absent.
    pub fn get_with_legacy(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.get(key)? {
            return Ok(Some(value));
        }
        match legacy_key(key) {
            Some(legacy) => self.get(legacy),
            None => Ok(None),
        }
    }

    pub fn load_collection(&self, key: &str) -> Result<Collection> {
        let text = self.get_with_legacy(key)?;
        Collection::parse(key, text.as_deref())
    }

    /// Writes the collection under its canonical key and retires the legacy one.
    pub fn store_collection(&mut self, collection: &Collection) -> Result<()> {
        let text = collection.to_json()?;
        self.set(collection.key(), text);
        self.retire_legacy(collection.key())
    }

    pub fn get_pointer(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .get_with_legacy(key)?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()))
    }

    pub fn set_pointer(&mut self, key: &str, value: Option<String>) -> Result<()> {
        match value {
            Some(value) => self.set(key, value),
            None => self.remove(key),
        }
        self.retire_legacy(key)
    }

    fn retire_legacy(&mut self, key: &str) -> Result<()> {
        if let Some(legacy) = legacy_key(key) {
            if self.get(legacy)?.is_some() {
                self.remove(legacy);
            }
        }
        Ok(())
    }

    pub fn into_changes(self) -> StoreChanges {
        self.staged
    }
}

// Type alias for the job to be executed by the writer actor.
type Job<T> = Box<dyn FnOnce(&mut StoreTransaction<'_>) -> Result<T> + Send + 'static>;

type ErasedResult = Result<Box<dyn Any + Send + 'static>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<ErasedResult>)>,
}

impl WriteHandle {
    /// Runs `job` on the writer actor inside a single store transaction.
    ///
    /// The job's staged changes are committed only when it returns `Ok`.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut StoreTransaction<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        let erased: Job<Box<dyn Any + Send + 'static>> =
            Box::new(move |txn: &mut StoreTransaction<'_>| {
                job(txn).map(|v| Box::new(v) as Box<dyn Any + Send>)
            });

        self.tx
            .send((erased, ret_tx))
            .await
            .map_err(|_| StorageError::WriterClosed)?;

        let boxed = ret_rx.await.map_err(|_| StorageError::WriterClosed)??;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| StorageError::UnexpectedResult.into())
    }
}

fn run_in_transaction(
    pool: &StorePool,
    job: Job<Box<dyn Any + Send + 'static>>,
) -> ErasedResult {
    let mut store = pool.write().map_err(|_| StorageError::LockPoisoned)?;

    let (outcome, changes) = {
        let mut txn = StoreTransaction::new(&**store);
        let outcome = job(&mut txn);
        (outcome, txn.into_changes())
    };

    match outcome {
        Ok(value) => {
            if !changes.is_empty() {
                if let Err(e) = store.apply(changes) {
                    error!("Failed to commit write job: {}", e);
                    return Err(e);
                }
            }
            Ok(value)
        }
        Err(e) => {
            debug!("Write job failed, discarding {} staged keys: {}", changes.len(), e);
            Err(e)
        }
    }
}

/// Spawns a background Tokio task that acts as the single writer to the store.
/// Jobs are processed serially, each in its own transaction.
pub fn spawn_writer(pool: StorePool) -> WriteHandle {
    // The channel is bounded; 1024 is an arbitrary size.
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<ErasedResult>,
    )>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result = run_in_transaction(&pool, job);
            // Ignore error if the receiver has dropped.
            let _ = reply_tx.send(result);
        }
        // All handles dropped, the actor terminates.
    });

    WriteHandle { tx }
}
