//! Summary module - totals, cost distribution and derived project metrics.

mod summary_calculator;
mod summary_model;
mod summary_service;
mod summary_traits;

pub use summary_calculator::{
    budget_used_percent, compute_distribution, compute_totals, cost_per_area,
    expected_labor_total, percentage_of, remaining_balance, select_denominator,
    summarize_project,
};
pub use summary_model::{CostDistribution, ExpenseTotals, FinancialSummary};
pub use summary_service::SummaryService;
pub use summary_traits::SummaryServiceTrait;
