use async_trait::async_trait;
use log::{debug, info, warn};
use obra_core::errors::{Error, Result};
use obra_core::expenses::{Expense, ExpenseRepositoryTrait, NewExpense};
use uuid::Uuid;

use super::model::ExpenseRecord;
use crate::db::{read_collection, Collection, StorePool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::EXPENSES_KEY;

pub struct ExpenseRepository {
    pool: StorePool,
    writer: WriteHandle,
}

/// Decodes stored expenses, skipping records that cannot become a valid expense.
fn decode_expenses(collection: &Collection) -> Vec<Expense> {
    collection
        .decode::<ExpenseRecord>()
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            match Expense::try_from(record) {
                Ok(expense) => Some(expense),
                Err(e) => {
                    warn!("Skipping expense {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

fn to_value(expense: &Expense) -> Result<serde_json::Value> {
    serde_json::to_value(ExpenseRecord::from(expense.clone())).into_core()
}

impl ExpenseRepository {
    pub fn new(pool: StorePool, writer: WriteHandle) -> Self {
        ExpenseRepository { pool, writer }
    }

    pub fn load_expenses_impl(&self) -> Result<Vec<Expense>> {
        let collection = read_collection(&self.pool, EXPENSES_KEY)?;
        Ok(decode_expenses(&collection))
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        self.load_expenses_impl()?
            .into_iter()
            .find(|expense| expense.id == expense_id)
            .ok_or_else(|| Error::not_found(format!("Expense {}", expense_id)))
    }

    fn get_expenses_by_project(&self, project_id: &str) -> Result<Vec<Expense>> {
        Ok(self
            .load_expenses_impl()?
            .into_iter()
            .filter(|expense| expense.project_id == project_id)
            .collect())
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        self.writer
            .exec(move |txn| {
                let mut expenses = txn.load_collection(EXPENSES_KEY)?;
                let id = new_expense
                    .id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                if expenses.contains(&id) {
                    return Err(Error::invalid_input(format!(
                        "Expense {} already exists",
                        id
                    )));
                }

                let expense = new_expense.into_expense(id);
                expenses.push(to_value(&expense)?);
                txn.store_collection(&expenses)?;
                info!(
                    "Created expense {} of {} on project {}",
                    expense.id, expense.amount, expense.project_id
                );
                Ok(expense)
            })
            .await
    }

    async fn update_expense(&self, expense: Expense) -> Result<Expense> {
        self.writer
            .exec(move |txn| {
                let mut expenses = txn.load_collection(EXPENSES_KEY)?;
                if !expenses.replace(&expense.id, to_value(&expense)?) {
                    return Err(Error::not_found(format!("Expense {}", expense.id)));
                }
                txn.store_collection(&expenses)?;
                debug!("Updated expense {}", expense.id);
                Ok(expense)
            })
            .await
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<usize> {
        let expense_id = expense_id.to_string();
        self.writer
            .exec(move |txn| {
                let mut expenses = txn.load_collection(EXPENSES_KEY)?;
                let removed = expenses.remove_by_id(&expense_id);
                if removed > 0 {
                    txn.store_collection(&expenses)?;
                    debug!("Deleted expense {}", expense_id);
                }
                Ok(removed)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, spawn_writer, MemoryStore};
    use chrono::NaiveDate;
    use obra_core::expenses::CategoryTag;
    use rust_decimal_macros::dec;

    fn repository(entries: &[(&str, &str)]) -> (StorePool, ExpenseRepository) {
        let pool = create_pool(Box::new(MemoryStore::with_entries(
            entries.iter().copied(),
        )));
        let writer = spawn_writer(pool.clone());
        (pool.clone(), ExpenseRepository::new(pool, writer))
    }

    #[tokio::test]
    async fn test_malformed_records_do_not_hide_the_rest() {
        let (_pool, repo) = repository(&[(
            "despesas",
            r#"[{"id":"d1","obraId":"o1","valor":100,"data":"2024-03-01","categoria":"material"},
                {"id":"d2","obraId":"o1","valor":-3,"categoria":"material"},
                {"obraId":"o1","valor":8},
                "garbage",
                {"id":"d5","obraId":"o2","valor":50,"tipo":"mao_obra"}]"#,
        )]);

        let o1 = repo.get_expenses_by_project("o1").unwrap();
        assert_eq!(o1.len(), 1);
        assert_eq!(o1[0].id, "d1");
        assert!(repo.get_expense("d2").unwrap_err().is_not_found());
        assert_eq!(repo.get_expense("d5").unwrap().category, CategoryTag::Labor);
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let (pool, repo) = repository(&[]);
        let created = repo
            .create_expense(NewExpense {
                project_id: "o1".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 10),
                amount: dec!(320.40),
                category: Some(CategoryTag::Material),
                description: Some("Cimento".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let mut edited = created.clone();
        edited.amount = dec!(330);
        repo.update_expense(edited).await.unwrap();
        assert_eq!(repo.get_expense(&created.id).unwrap().amount, dec!(330));

        assert_eq!(repo.delete_expense(&created.id).await.unwrap(), 1);
        assert_eq!(repo.delete_expense(&created.id).await.unwrap(), 0);
        assert!(read_collection(&pool, EXPENSES_KEY).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rewrite_keeps_unreadable_records() {
        let (pool, repo) = repository(&[(
            "despesas",
            r#"[{"id":"old","obraId":"o1","valor":"n/a"}]"#,
        )]);
        repo.create_expense(NewExpense {
            project_id: "o1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 10),
            amount: dec!(10),
            category: Some(CategoryTag::Material),
            ..Default::default()
        })
        .await
        .unwrap();

        let stored = read_collection(&pool, EXPENSES_KEY).unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.contains("old"));
    }
}
