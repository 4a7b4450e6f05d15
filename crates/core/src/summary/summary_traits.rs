use chrono::NaiveDate;

use crate::errors::Result;
use crate::summary::summary_model::FinancialSummary;

/// Trait for project summary operations
pub trait SummaryServiceTrait: Send + Sync {
    fn get_project_summary(&self, project_id: &str) -> Result<FinancialSummary>;
    fn get_project_summary_at(&self, project_id: &str, today: NaiveDate) -> Result<FinancialSummary>;
}
