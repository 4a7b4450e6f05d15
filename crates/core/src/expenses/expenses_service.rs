use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::constants::PAYMENT_DESCRIPTION_PREFIX;
use crate::errors::{Error, Result};
use crate::expenses::expenses_model::{CategoryTag, CostGroup, Expense, NewExpense};
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::professionals::{Professional, ProfessionalRepositoryTrait};

pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    professional_repository: Arc<dyn ProfessionalRepositoryTrait>,
}

impl ExpenseService {
    pub fn new(
        repository: Arc<dyn ExpenseRepositoryTrait>,
        professional_repository: Arc<dyn ProfessionalRepositoryTrait>,
    ) -> Self {
        ExpenseService {
            repository,
            professional_repository,
        }
    }

    /// Loads the referenced professional and checks it belongs to the project.
    fn linked_professional(&self, professional_id: &str, project_id: &str) -> Result<Professional> {
        let professional = self.professional_repository.get_professional(professional_id)?;
        if professional.project_id != project_id {
            return Err(Error::invalid_input(format!(
                "Professional {} does not belong to project {}",
                professional_id, project_id
            )));
        }
        Ok(professional)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true)
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        self.repository.get_expense(expense_id)
    }

    fn get_project_expenses(&self, project_id: &str) -> Result<Vec<Expense>> {
        self.repository.get_expenses_by_project(project_id)
    }

    fn get_project_expenses_by_group(
        &self,
        project_id: &str,
        group: CostGroup,
    ) -> Result<Vec<Expense>> {
        Ok(self
            .repository
            .get_expenses_by_project(project_id)?
            .into_iter()
            .filter(|expense| expense.classification().group() == group)
            .collect())
    }

    async fn create_expense(&self, mut new_expense: NewExpense) -> Result<Expense> {
        if new_expense.has_professional() {
            let professional_id = new_expense.professional_id.clone().unwrap_or_default();
            let professional =
                self.linked_professional(professional_id.trim(), &new_expense.project_id)?;
            new_expense.category = Some(CategoryTag::Labor);
            if is_blank(&new_expense.description) {
                new_expense.description =
                    Some(format!("{}{}", PAYMENT_DESCRIPTION_PREFIX, professional.name));
            }
        }
        new_expense.validate()?;

        let expense = self.repository.create_expense(new_expense).await?;
        info!(
            "Recorded {} expense {} of {} on project {}",
            expense.classification(),
            expense.id,
            expense.amount,
            expense.project_id
        );
        Ok(expense)
    }

    async fn update_expense(&self, mut expense: Expense) -> Result<Expense> {
        let existing = self.repository.get_expense(&expense.id)?;
        if existing.project_id != expense.project_id {
            return Err(Error::invalid_input(format!(
                "Expense {} cannot move to another project",
                expense.id
            )));
        }
        expense.professional_id = expense
            .professional_id
            .take()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        if let Some(professional_id) = expense.professional_id.as_deref() {
            self.linked_professional(professional_id, &expense.project_id)?;
            expense.category = CategoryTag::Labor;
        }
        expense.validate()?;

        debug!("Updating expense {}", expense.id);
        self.repository.update_expense(expense).await
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<usize> {
        let removed = self.repository.delete_expense(expense_id).await?;
        if removed == 0 {
            return Err(Error::not_found(format!("Expense {}", expense_id)));
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::ExpenseCategory;
    use crate::test_support::{
        sample_expense, sample_professional, sample_project, InMemoryRepositories,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<InMemoryRepositories>, ExpenseService) {
        let repos = Arc::new(InMemoryRepositories::default());
        repos.insert_project(sample_project("p1", "owner-1"));
        repos.insert_project(sample_project("p2", "owner-1"));
        repos.insert_professional(sample_professional("pro-1", "p1", "João"));
        repos.insert_professional(sample_professional("pro-2", "p2", "Maria"));
        let service = ExpenseService::new(repos.clone(), repos.clone());
        (repos, service)
    }

    fn material_expense(project_id: &str) -> NewExpense {
        NewExpense {
            project_id: project_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 2),
            amount: dec!(1200),
            category: Some(CategoryTag::Material),
            description: Some("Tijolos".to_string()),
            supplier: Some("Depósito Central".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_material_expense() {
        let (repos, service) = setup();
        let expense = service.create_expense(material_expense("p1")).await.unwrap();
        assert_eq!(expense.classification(), ExpenseCategory::Material);
        assert_eq!(expense.supplier.as_deref(), Some("Depósito Central"));
        assert_eq!(repos.expenses().len(), 1);
    }

    #[tokio::test]
    async fn test_professional_reference_forces_labor_and_default_description() {
        let (_repos, service) = setup();
        let mut new_expense = material_expense("p1");
        new_expense.professional_id = Some("pro-1".to_string());
        new_expense.description = None;

        let expense = service.create_expense(new_expense).await.unwrap();
        assert_eq!(expense.category, CategoryTag::Labor);
        assert_eq!(expense.description.as_deref(), Some("Payment - João"));
        assert!(expense.is_payment_to("pro-1"));
    }

    #[tokio::test]
    async fn test_professional_from_another_project_is_rejected() {
        let (repos, service) = setup();
        let mut new_expense = material_expense("p1");
        new_expense.professional_id = Some("pro-2".to_string());
        assert!(service.create_expense(new_expense).await.is_err());
        assert!(repos.expenses().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_professional_is_not_found() {
        let (_repos, service) = setup();
        let mut new_expense = material_expense("p1");
        new_expense.professional_id = Some("ghost".to_string());
        let err = service.create_expense(new_expense).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_expense_keeps_project() {
        let (repos, service) = setup();
        repos.insert_expense(sample_expense("e1", "p1", dec!(100), CategoryTag::Material));

        let mut expense = service.get_expense("e1").unwrap();
        expense.project_id = "p2".to_string();
        assert!(service.update_expense(expense).await.is_err());

        let mut expense = service.get_expense("e1").unwrap();
        expense.amount = dec!(150);
        let updated = service.update_expense(expense).await.unwrap();
        assert_eq!(updated.amount, dec!(150));
    }

    #[tokio::test]
    async fn test_update_expense_with_stored_zero_amount() {
        let (repos, service) = setup();
        repos.insert_expense(sample_expense("e1", "p1", dec!(0), CategoryTag::Material));

        let mut expense = service.get_expense("e1").unwrap();
        expense.description = Some("Areia".to_string());
        let updated = service.update_expense(expense).await.unwrap();
        assert_eq!(updated.amount, dec!(0));
        assert_eq!(updated.description.as_deref(), Some("Areia"));

        let mut expense = service.get_expense("e1").unwrap();
        expense.amount = dec!(-10);
        assert!(service.update_expense(expense).await.is_err());
    }

    #[tokio::test]
    async fn test_create_expense_rejects_zero_amount() {
        let (_repos, service) = setup();
        let mut new_expense = material_expense("p1");
        new_expense.amount = dec!(0);
        assert!(service.create_expense(new_expense).await.is_err());
    }

    #[tokio::test]
    async fn test_expenses_by_group() {
        let (repos, service) = setup();
        repos.insert_expense(sample_expense("e1", "p1", dec!(100), CategoryTag::Material));
        repos.insert_expense(sample_expense("e2", "p1", dec!(200), CategoryTag::Labor));
        repos.insert_expense(sample_expense(
            "e3",
            "p1",
            dec!(50),
            CategoryTag::Other("frete".to_string()),
        ));

        let labor = service
            .get_project_expenses_by_group("p1", CostGroup::Labor)
            .unwrap();
        assert_eq!(labor.len(), 1);
        let material_other = service
            .get_project_expenses_by_group("p1", CostGroup::MaterialOther)
            .unwrap();
        assert_eq!(material_other.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_expense() {
        let (_repos, service) = setup();
        assert!(service.delete_expense("nope").await.unwrap_err().is_not_found());
    }
}
