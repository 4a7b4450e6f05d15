//! Key-value storage implementation for expenses.

mod model;
mod repository;

pub use model::ExpenseRecord;
pub use repository::ExpenseRepository;
