//! Key-value storage implementation for the obra expense tracker.
//!
//! This crate persists the domain defined in `obra-core` as JSON documents
//! kept under fixed logical keys (`projects`, `expenses`, `professionals`,
//! `alerts` and the active-project pointer). It contains:
//! - The backing stores (in memory or a JSON file on disk)
//! - The single writer actor and its transactional boundary
//! - Record types that read the field names written by earlier versions
//! - Repository implementations for all domain entities
//!
//! # Architecture
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-kv (this crate)
//!              │
//!              ▼
//!   MemoryStore | FileStore
//! ```

pub mod config;
pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod alerts;
pub mod expenses;
pub mod professionals;
pub mod projects;
pub mod session;

// Re-export store utilities
pub use db::{
    create_pool, init, read_collection, read_pointer, read_value, spawn_writer, Collection,
    FileStore, KeyValueStore, MemoryStore, StoreChanges, StorePool, StoreTransaction,
    WriteHandle,
};

pub use config::{StorageBackend, StorageConfig};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use alerts::AlertRepository;
pub use expenses::ExpenseRepository;
pub use professionals::ProfessionalRepository;
pub use projects::ProjectRepository;
pub use session::SessionRepository;

// Re-export from obra-core for convenience
pub use obra_core::errors::{DatabaseError, Error, Result};
