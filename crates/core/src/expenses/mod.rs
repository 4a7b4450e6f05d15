//! Expenses module - expense records, category tags and classification.

mod expenses_classifier;
mod expenses_model;
mod expenses_service;
mod expenses_traits;

pub use expenses_classifier::{classify_expense, resolve_professional_reference};
pub use expenses_model::{CategoryTag, CostGroup, Expense, ExpenseCategory, NewExpense};
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
