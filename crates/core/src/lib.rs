//! Obra Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for tracking construction project
//! expenses: expense classification, financial aggregation, professional
//! balances, report filtering and alerts. It is storage-agnostic and defines
//! traits that are implemented by the `storage-kv` crate.

pub mod alerts;
pub mod constants;
pub mod errors;
pub mod expenses;
pub mod professionals;
pub mod projects;
pub mod reports;
pub mod session;
pub mod summary;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
