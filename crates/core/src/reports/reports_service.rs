use std::sync::Arc;

use chrono::NaiveDateTime;
use log::debug;

use crate::errors::{Error, Result};
use crate::expenses::ExpenseRepositoryTrait;
use crate::professionals::ProfessionalRepositoryTrait;
use crate::projects::ProjectRepositoryTrait;
use crate::reports::reports_model::{build_report, Report, ReportRequest};
use crate::reports::reports_traits::ReportServiceTrait;
use crate::utils::time_utils::now_utc;

pub struct ReportService {
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    professional_repository: Arc<dyn ProfessionalRepositoryTrait>,
}

impl ReportService {
    pub fn new(
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        professional_repository: Arc<dyn ProfessionalRepositoryTrait>,
    ) -> Self {
        ReportService {
            project_repository,
            expense_repository,
            professional_repository,
        }
    }
}

impl ReportServiceTrait for ReportService {
    fn generate_report(&self, request: &ReportRequest) -> Result<Report> {
        self.generate_report_at(request, now_utc())
    }

    fn generate_report_at(&self, request: &ReportRequest, generated_at: NaiveDateTime) -> Result<Report> {
        let filter = request.validate()?;

        let project = self.project_repository.get_project(&request.project_id)?;
        let professionals = self
            .professional_repository
            .get_professionals_by_project(&project.id)?;
        if let Some(professional_id) = filter.professional_id() {
            if !professionals.iter().any(|p| p.id == professional_id) {
                return Err(Error::not_found(format!(
                    "Professional {} on project {}",
                    professional_id, project.id
                )));
            }
        }
        let expenses = self.expense_repository.get_expenses_by_project(&project.id)?;

        debug!(
            "Generating {} report for project {}",
            filter.report_type(),
            project.id
        );
        Ok(build_report(
            &project,
            expenses,
            &professionals,
            &filter,
            generated_at,
        ))
    }
}
