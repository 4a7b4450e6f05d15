use async_trait::async_trait;

use crate::errors::Result;
use crate::expenses::expenses_model::{CostGroup, Expense, NewExpense};

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn get_expense(&self, expense_id: &str) -> Result<Expense>;
    fn get_expenses_by_project(&self, project_id: &str) -> Result<Vec<Expense>>;
    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    async fn update_expense(&self, expense: Expense) -> Result<Expense>;
    async fn delete_expense(&self, expense_id: &str) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn get_expense(&self, expense_id: &str) -> Result<Expense>;
    fn get_project_expenses(&self, project_id: &str) -> Result<Vec<Expense>>;
    fn get_project_expenses_by_group(
        &self,
        project_id: &str,
        group: CostGroup,
    ) -> Result<Vec<Expense>>;
    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    async fn update_expense(&self, expense: Expense) -> Result<Expense>;
    async fn delete_expense(&self, expense_id: &str) -> Result<usize>;
}
