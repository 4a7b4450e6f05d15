//! Key-value storage implementation for projects.

mod model;
mod repository;

pub use model::{LocationRecord, ProjectRecord};
pub use repository::ProjectRepository;
