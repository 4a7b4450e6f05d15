//! Expense domain models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{LABOR_CATEGORY_CANONICAL, LABOR_CATEGORY_TOKENS, MATERIAL_CATEGORY_TOKEN};
use crate::errors::{Error, Result, ValidationError};
use crate::expenses::expenses_classifier::classify_expense;

/// Category literal attached to an expense.
///
/// Recognized literals collapse to `Labor` or `Material`; anything else is
/// kept verbatim in `Other`. An empty `Other` means no category was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryTag {
    Labor,
    Material,
    Other(String),
}

impl Default for CategoryTag {
    fn default() -> Self {
        CategoryTag::Other(String::new())
    }
}

impl CategoryTag {
    /// Parses a single literal, case-insensitively.
    pub fn parse(literal: &str) -> Self {
        let trimmed = literal.trim();
        let normalized = trimmed.to_lowercase();
        if LABOR_CATEGORY_TOKENS.contains(&normalized.as_str()) {
            CategoryTag::Labor
        } else if normalized == MATERIAL_CATEGORY_TOKEN {
            CategoryTag::Material
        } else {
            CategoryTag::Other(trimmed.to_string())
        }
    }

    /// Resolves the tag from the three stored spellings, taking the first
    /// non-blank one in `category`, `categoria`, `tipo` order.
    pub fn from_legacy_fields(
        category: Option<&str>,
        categoria: Option<&str>,
        tipo: Option<&str>,
    ) -> Self {
        [category, categoria, tipo]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .map(Self::parse)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryTag::Labor => LABOR_CATEGORY_CANONICAL,
            CategoryTag::Material => MATERIAL_CATEGORY_TOKEN,
            CategoryTag::Other(literal) => literal,
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, CategoryTag::Other(literal) if literal.is_empty())
    }
}

impl From<String> for CategoryTag {
    fn from(literal: String) -> Self {
        CategoryTag::parse(&literal)
    }
}

impl From<CategoryTag> for String {
    fn from(tag: CategoryTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived classification of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Labor,
    Material,
    Other,
}

impl ExpenseCategory {
    pub fn group(&self) -> CostGroup {
        match self {
            ExpenseCategory::Labor => CostGroup::Labor,
            ExpenseCategory::Material | ExpenseCategory::Other => CostGroup::MaterialOther,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseCategory::Labor => "labor",
            ExpenseCategory::Material => "material",
            ExpenseCategory::Other => "other",
        };
        f.write_str(label)
    }
}

/// The two halves of the dashboard split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostGroup {
    Labor,
    MaterialOther,
}

/// Domain model representing an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub project_id: String,
    pub date: Option<NaiveDate>,
    pub amount: Decimal,
    pub category: CategoryTag,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub professional_id: Option<String>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub attachment: Option<String>,
}

impl Expense {
    pub fn classification(&self) -> ExpenseCategory {
        classify_expense(&self.category, self.professional_id.as_deref())
    }

    pub fn is_labor(&self) -> bool {
        self.classification() == ExpenseCategory::Labor
    }

    /// True when this is a labor expense paid to the given professional.
    pub fn is_payment_to(&self, professional_id: &str) -> bool {
        self.is_labor() && self.professional_id.as_deref() == Some(professional_id)
    }

    /// Checks an edited expense before it replaces the stored one.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        validate_expense_fields(
            &self.project_id,
            self.date,
            self.amount,
            &self.category,
            self.professional_id.as_deref(),
        )
    }
}

/// Input model for creating a new expense
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    pub project_id: String,
    pub date: Option<NaiveDate>,
    pub amount: Decimal,
    pub category: Option<CategoryTag>,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub professional_id: Option<String>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub attachment: Option<String>,
}

impl NewExpense {
    /// New expenses need a positive amount. Stored ones may already hold zero.
    pub fn validate(&self) -> Result<()> {
        validate_expense_fields(
            &self.project_id,
            self.date,
            self.amount,
            self.category.as_ref().unwrap_or(&CategoryTag::default()),
            self.professional_id.as_deref(),
        )?;
        if self.amount.is_zero() {
            return Err(Error::invalid_input("Expense amount must be greater than zero"));
        }
        Ok(())
    }

    pub fn has_professional(&self) -> bool {
        self.professional_id
            .as_deref()
            .map(|id| !id.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn into_expense(self, id: String) -> Expense {
        Expense {
            id,
            project_id: self.project_id,
            date: self.date,
            amount: self.amount,
            category: self.category.unwrap_or_default(),
            description: self.description,
            payment_method: self.payment_method,
            professional_id: self.professional_id.filter(|id| !id.trim().is_empty()),
            supplier: self.supplier,
            notes: self.notes,
            attachment: self.attachment,
        }
    }
}

fn validate_expense_fields(
    project_id: &str,
    date: Option<NaiveDate>,
    amount: Decimal,
    category: &CategoryTag,
    professional_id: Option<&str>,
) -> Result<()> {
    if project_id.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "projectId".to_string(),
        )));
    }
    if date.is_none() {
        return Err(Error::Validation(ValidationError::MissingField(
            "date".to_string(),
        )));
    }
    if amount < Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NegativeAmount(amount)));
    }
    let has_professional = professional_id
        .map(|id| !id.trim().is_empty())
        .unwrap_or(false);
    if category.is_unspecified() && !has_professional {
        return Err(Error::Validation(ValidationError::MissingField(
            "category".to_string(),
        )));
    }
    Ok(())
}
