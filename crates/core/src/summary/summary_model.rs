//! Summary domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::projects::ScheduleStatus;

/// Sums of an expense list per classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTotals {
    pub total_spent: Decimal,
    pub labor_total: Decimal,
    pub material_total: Decimal,
    pub other_total: Decimal,
    /// Always `total_spent - labor_total`.
    pub material_other_total: Decimal,
    pub expense_count: usize,
}

/// Share of each classification against the selected denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CostDistribution {
    /// Budget when positive, otherwise the total spent.
    pub denominator: Decimal,
    pub labor_total: Decimal,
    pub material_other_total: Decimal,
    pub material_total: Decimal,
    pub other_total: Decimal,
    pub perc_labor: Decimal,
    pub perc_material_other: Decimal,
    pub perc_material: Decimal,
    pub perc_other: Decimal,
}

/// Dashboard figures for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub project_id: String,
    pub budget: Option<Decimal>,
    pub area: Decimal,
    pub totals: ExpenseTotals,
    pub distribution: CostDistribution,
    /// `None` when the project has no positive budget.
    pub remaining_balance: Option<Decimal>,
    pub budget_used_percent: Decimal,
    pub cost_per_area: Decimal,
    pub expected_labor_total: Decimal,
    pub schedule: Option<ScheduleStatus>,
}

impl FinancialSummary {
    pub fn total_spent(&self) -> Decimal {
        self.totals.total_spent
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining_balance
            .map(|balance| balance < Decimal::ZERO)
            .unwrap_or(false)
    }
}
