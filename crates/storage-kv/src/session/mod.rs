//! Key-value storage of the active-project pointer.

mod repository;

pub use repository::SessionRepository;
