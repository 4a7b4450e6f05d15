use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::constants::PAYMENT_DESCRIPTION_PREFIX;
use crate::errors::{Error, Result};
use crate::expenses::{CategoryTag, Expense, ExpenseRepositoryTrait, NewExpense};
use crate::professionals::contract_model::Contract;
use crate::professionals::professionals_model::{
    NewPayment, NewProfessional, Professional, ProfessionalBalance, ProjectLaborBalances,
};
use crate::professionals::professionals_traits::{
    ProfessionalRepositoryTrait, ProfessionalServiceTrait,
};

pub struct ProfessionalService {
    repository: Arc<dyn ProfessionalRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
}

impl ProfessionalService {
    pub fn new(
        repository: Arc<dyn ProfessionalRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    ) -> Self {
        ProfessionalService {
            repository,
            expense_repository,
        }
    }
}

#[async_trait]
impl ProfessionalServiceTrait for ProfessionalService {
    fn get_professional(&self, professional_id: &str) -> Result<Professional> {
        self.repository.get_professional(professional_id)
    }

    fn get_project_professionals(&self, project_id: &str) -> Result<Vec<Professional>> {
        self.repository.get_professionals_by_project(project_id)
    }

    fn get_balance(&self, professional_id: &str) -> Result<ProfessionalBalance> {
        let professional = self.repository.get_professional(professional_id)?;
        let expenses = self
            .expense_repository
            .get_expenses_by_project(&professional.project_id)?;
        Ok(ProfessionalBalance::compute(&professional, &expenses))
    }

    fn get_project_balances(&self, project_id: &str) -> Result<ProjectLaborBalances> {
        let professionals = self.repository.get_professionals_by_project(project_id)?;
        let expenses = self.expense_repository.get_expenses_by_project(project_id)?;
        Ok(ProjectLaborBalances::compute(
            project_id,
            &professionals,
            &expenses,
        ))
    }

    async fn create_professional(&self, new_professional: NewProfessional) -> Result<Professional> {
        new_professional.validate()?;
        let professional = self.repository.create_professional(new_professional).await?;
        info!(
            "Registered professional {} ({}) on project {}",
            professional.id, professional.role, professional.project_id
        );
        Ok(professional)
    }

    async fn update_professional(&self, professional: Professional) -> Result<Professional> {
        professional.validate()?;
        let existing = self.repository.get_professional(&professional.id)?;
        if existing.project_id != professional.project_id {
            return Err(Error::invalid_input(format!(
                "Professional {} cannot move to another project",
                professional.id
            )));
        }
        if let Some(contract) = professional.contract.as_ref() {
            contract.validate()?;
        }
        self.repository.update_professional(professional).await
    }

    async fn delete_professional(&self, professional_id: &str) -> Result<usize> {
        let removed = self.repository.delete_professional(professional_id).await?;
        if removed == 0 {
            return Err(Error::not_found(format!("Professional {}", professional_id)));
        }
        Ok(removed)
    }

    async fn save_contract(&self, professional_id: &str, mut contract: Contract) -> Result<Professional> {
        contract.validate()?;
        let mut professional = self.repository.get_professional(professional_id)?;

        let expected = contract.resolve_expected_total();
        contract.expected_value = Some(expected);
        professional.expected_value = Some(expected);
        professional.contract = Some(contract);

        debug!(
            "Saving contract for professional {} with expected total {}",
            professional_id, expected
        );
        self.repository.update_professional(professional).await
    }

    async fn remove_contract(&self, professional_id: &str) -> Result<Professional> {
        let mut professional = self.repository.get_professional(professional_id)?;
        professional.contract = None;
        professional.expected_value = None;
        self.repository.update_professional(professional).await
    }

    async fn register_payment(&self, professional_id: &str, payment: NewPayment) -> Result<Expense> {
        payment.validate()?;
        let professional = self.repository.get_professional(professional_id)?;

        let new_expense = NewExpense {
            id: None,
            project_id: professional.project_id.clone(),
            date: payment.date,
            amount: payment.amount,
            category: Some(CategoryTag::Labor),
            description: Some(format!("{}{}", PAYMENT_DESCRIPTION_PREFIX, professional.name)),
            payment_method: payment.payment_method,
            professional_id: Some(professional.id.clone()),
            supplier: None,
            notes: payment.notes,
            attachment: payment.attachment,
        };
        new_expense.validate()?;

        let expense = self.expense_repository.create_expense(new_expense).await?;
        info!(
            "Registered payment {} of {} to professional {}",
            expense.id, expense.amount, professional.id
        );
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::ExpenseCategory;
    use crate::professionals::{ContractError, PricingModel, Stage};
    use crate::test_support::{
        sample_expense, sample_professional, sample_project, InMemoryRepositories,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<InMemoryRepositories>, ProfessionalService) {
        let repos = Arc::new(InMemoryRepositories::default());
        repos.insert_project(sample_project("p1", "owner-1"));
        repos.insert_professional(sample_professional("pro-1", "p1", "João"));
        let service = ProfessionalService::new(repos.clone(), repos.clone());
        (repos, service)
    }

    #[tokio::test]
    async fn test_save_contract_stores_expected_total_on_both() {
        let (_repos, service) = setup();
        let contract = Contract::new(PricingModel::Staged {
            stages: vec![
                Stage {
                    name: "Fundação".to_string(),
                    value: dec!(4000),
                },
                Stage {
                    name: "Telhado".to_string(),
                    value: dec!(2500),
                },
            ],
        });

        let professional = service.save_contract("pro-1", contract).await.unwrap();
        assert_eq!(professional.expected_value, Some(dec!(6500)));
        assert_eq!(
            professional.contract.as_ref().unwrap().expected_value,
            Some(dec!(6500))
        );
        assert_eq!(professional.expected_amount(), dec!(6500));
    }

    #[tokio::test]
    async fn test_save_contract_rejects_unrecognized_model() {
        let (repos, service) = setup();
        let err = service
            .save_contract("pro-1", Contract::new(PricingModel::Unrecognized))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Contract(ContractError::UnrecognizedPricingModel(_))
        ));
        assert!(repos.professional("pro-1").unwrap().contract.is_none());
    }

    #[tokio::test]
    async fn test_remove_contract_clears_expected_value() {
        let (_repos, service) = setup();
        service
            .save_contract(
                "pro-1",
                Contract::new(PricingModel::DailyRate {
                    daily_rate: dec!(300),
                    day_count: dec!(10),
                }),
            )
            .await
            .unwrap();

        let professional = service.remove_contract("pro-1").await.unwrap();
        assert!(professional.contract.is_none());
        assert_eq!(professional.expected_amount(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_register_payment_creates_labor_expense() {
        let (repos, service) = setup();
        let payment = NewPayment {
            date: NaiveDate::from_ymd_opt(2024, 6, 3),
            amount: dec!(800),
            payment_method: Some("pix".to_string()),
            ..Default::default()
        };

        let expense = service.register_payment("pro-1", payment).await.unwrap();
        assert_eq!(expense.project_id, "p1");
        assert_eq!(expense.classification(), ExpenseCategory::Labor);
        assert_eq!(expense.description.as_deref(), Some("Payment - João"));
        assert_eq!(expense.professional_id.as_deref(), Some("pro-1"));
        assert_eq!(repos.expenses().len(), 1);
    }

    #[tokio::test]
    async fn test_register_payment_requires_date() {
        let (repos, service) = setup();
        let payment = NewPayment {
            amount: dec!(800),
            ..Default::default()
        };
        assert!(service.register_payment("pro-1", payment).await.is_err());
        assert!(repos.expenses().is_empty());
    }

    #[tokio::test]
    async fn test_balance_after_payments() {
        let (repos, service) = setup();
        service
            .save_contract(
                "pro-1",
                Contract::new(PricingModel::LumpSum {
                    agreed_amount: dec!(12000),
                }),
            )
            .await
            .unwrap();
        let mut paid = sample_expense("e1", "p1", dec!(4000), CategoryTag::Labor);
        paid.professional_id = Some("pro-1".to_string());
        repos.insert_expense(paid);
        repos.insert_expense(sample_expense("e2", "p1", dec!(900), CategoryTag::Material));

        let balance = service.get_balance("pro-1").unwrap();
        assert_eq!(balance.expected_amount, dec!(12000));
        assert_eq!(balance.paid_amount, dec!(4000));
        assert_eq!(balance.balance_due, dec!(8000));

        let project = service.get_project_balances("p1").unwrap();
        assert_eq!(project.expected_labor_total, dec!(12000));
        assert_eq!(project.balances.len(), 1);
    }

    #[tokio::test]
    async fn test_update_professional_cannot_change_project() {
        let (_repos, service) = setup();
        let mut professional = service.get_professional("pro-1").unwrap();
        professional.project_id = "p2".to_string();
        assert!(service.update_professional(professional).await.is_err());
    }
}
