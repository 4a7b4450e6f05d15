//! Professional domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::expenses::Expense;
use crate::professionals::contract_model::Contract;
use crate::utils::decimal::saturating_sum;

/// Domain model representing a professional hired for a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub expected_value: Option<Decimal>,
    pub contract: Option<Contract>,
}

impl Professional {
    /// Amount expected to be paid to this professional.
    ///
    /// Uses the first non-zero of the professional's own expected value, the
    /// contract's expected value and the contract's total expected value.
    pub fn expected_amount(&self) -> Decimal {
        let non_zero = |value: Option<Decimal>| value.filter(|v| !v.is_zero());
        non_zero(self.expected_value)
            .or_else(|| {
                self.contract
                    .as_ref()
                    .and_then(|contract| non_zero(contract.expected_value))
            })
            .or_else(|| {
                self.contract
                    .as_ref()
                    .and_then(|contract| non_zero(contract.total_expected_value))
            })
            .unwrap_or(Decimal::ZERO)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        validate_professional_fields(&self.project_id, &self.name, &self.role)
    }
}

/// Input model for registering a new professional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfessional {
    pub id: Option<String>,
    pub project_id: String,
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl NewProfessional {
    pub fn validate(&self) -> Result<()> {
        validate_professional_fields(&self.project_id, &self.name, &self.role)
    }

    pub fn into_professional(self, id: String) -> Professional {
        Professional {
            id,
            project_id: self.project_id,
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            phone: self.phone,
            notes: self.notes,
            expected_value: None,
            contract: None,
        }
    }
}

fn validate_professional_fields(project_id: &str, name: &str, role: &str) -> Result<()> {
    if project_id.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "projectId".to_string(),
        )));
    }
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    if role.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "role".to_string(),
        )));
    }
    Ok(())
}

/// Input model for a payment made to a professional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub date: Option<NaiveDate>,
    pub amount: Decimal,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub attachment: Option<String>,
}

impl NewPayment {
    pub fn validate(&self) -> Result<()> {
        if self.date.is_none() {
            return Err(Error::Validation(ValidationError::MissingField(
                "date".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "Payment amount must be greater than zero, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// What was expected, what was paid and what is still owed to a professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalBalance {
    pub professional_id: String,
    pub name: String,
    pub role: String,
    pub expected_amount: Decimal,
    pub paid_amount: Decimal,
    /// Negative when the professional was overpaid.
    pub balance_due: Decimal,
    pub payments: Vec<Expense>,
}

impl ProfessionalBalance {
    /// Builds the balance from the professional and the project's expenses.
    pub fn compute(professional: &Professional, expenses: &[Expense]) -> Self {
        let mut payments: Vec<Expense> = expenses
            .iter()
            .filter(|expense| expense.is_payment_to(&professional.id))
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.date.cmp(&a.date));

        let expected_amount = professional.expected_amount();
        let paid_amount = saturating_sum(payments.iter().map(|payment| payment.amount));

        ProfessionalBalance {
            professional_id: professional.id.clone(),
            name: professional.name.clone(),
            role: professional.role.clone(),
            expected_amount,
            paid_amount,
            balance_due: expected_amount.saturating_sub(paid_amount),
            payments,
        }
    }

    pub fn is_overpaid(&self) -> bool {
        self.balance_due < Decimal::ZERO
    }
}

/// Labor balances of every professional on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLaborBalances {
    pub project_id: String,
    pub expected_labor_total: Decimal,
    pub paid_to_professionals_total: Decimal,
    pub balances: Vec<ProfessionalBalance>,
}

impl ProjectLaborBalances {
    pub fn compute(project_id: &str, professionals: &[Professional], expenses: &[Expense]) -> Self {
        let balances: Vec<ProfessionalBalance> = professionals
            .iter()
            .map(|professional| ProfessionalBalance::compute(professional, expenses))
            .collect();

        ProjectLaborBalances {
            project_id: project_id.to_string(),
            expected_labor_total: saturating_sum(balances.iter().map(|b| b.expected_amount)),
            paid_to_professionals_total: saturating_sum(balances.iter().map(|b| b.paid_amount)),
            balances,
        }
    }
}
