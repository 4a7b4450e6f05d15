//! Key-value storage implementation for alerts.

mod model;
mod repository;

pub use model::AlertRecord;
pub use repository::AlertRepository;
