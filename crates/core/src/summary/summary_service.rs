use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use crate::errors::Result;
use crate::expenses::ExpenseRepositoryTrait;
use crate::professionals::ProfessionalRepositoryTrait;
use crate::projects::ProjectRepositoryTrait;
use crate::summary::summary_calculator::summarize_project;
use crate::summary::summary_model::FinancialSummary;
use crate::summary::summary_traits::SummaryServiceTrait;
use crate::utils::time_utils::today_utc;

pub struct SummaryService {
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    professional_repository: Arc<dyn ProfessionalRepositoryTrait>,
}

impl SummaryService {
    pub fn new(
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        professional_repository: Arc<dyn ProfessionalRepositoryTrait>,
    ) -> Self {
        SummaryService {
            project_repository,
            expense_repository,
            professional_repository,
        }
    }
}

impl SummaryServiceTrait for SummaryService {
    fn get_project_summary(&self, project_id: &str) -> Result<FinancialSummary> {
        self.get_project_summary_at(project_id, today_utc())
    }

    fn get_project_summary_at(&self, project_id: &str, today: NaiveDate) -> Result<FinancialSummary> {
        let project = self.project_repository.get_project(project_id)?;
        let expenses = self.expense_repository.get_expenses_by_project(project_id)?;
        let professionals = self
            .professional_repository
            .get_professionals_by_project(project_id)?;

        debug!(
            "Summarizing project {} over {} expenses",
            project_id,
            expenses.len()
        );
        Ok(summarize_project(&project, &expenses, &professionals, today))
    }
}
