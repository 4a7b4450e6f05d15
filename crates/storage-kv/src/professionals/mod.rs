//! Key-value storage implementation for professionals and their contracts.

mod model;
mod repository;

pub use model::{ContractRecord, ProfessionalRecord, StageRecord};
pub use repository::ProfessionalRepository;
