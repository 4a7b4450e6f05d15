use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};

use crate::alerts::alerts_evaluator::evaluate_alert;
use crate::alerts::alerts_model::{Alert, AlertEvaluation, AlertKind, NewAlert};
use crate::alerts::alerts_traits::{AlertRepositoryTrait, AlertServiceTrait};
use crate::errors::{Error, Result};
use crate::expenses::ExpenseRepositoryTrait;
use crate::professionals::{ProfessionalRepositoryTrait, ProjectLaborBalances};
use crate::projects::ProjectRepositoryTrait;
use crate::summary::compute_totals;

pub struct AlertService {
    repository: Arc<dyn AlertRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    professional_repository: Arc<dyn ProfessionalRepositoryTrait>,
}

impl AlertService {
    pub fn new(
        repository: Arc<dyn AlertRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        professional_repository: Arc<dyn ProfessionalRepositoryTrait>,
    ) -> Self {
        AlertService {
            repository,
            project_repository,
            expense_repository,
            professional_repository,
        }
    }

    /// Checks the project exists and a payment alert's professional belongs to it.
    fn check_alert_target(&self, project_id: &str, kind: &AlertKind) -> Result<()> {
        self.project_repository.get_project(project_id)?;
        if let Some(professional_id) = kind.professional_id() {
            let professional = self
                .professional_repository
                .get_professional(professional_id)?;
            if professional.project_id != project_id {
                return Err(Error::invalid_input(format!(
                    "Professional {} does not belong to project {}",
                    professional_id, project_id
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AlertServiceTrait for AlertService {
    fn get_project_alerts(&self, project_id: &str) -> Result<Vec<Alert>> {
        self.repository.get_alerts_by_project(project_id)
    }

    fn evaluate_project_alerts(&self, project_id: &str, today: NaiveDate) -> Result<Vec<AlertEvaluation>> {
        let alerts = self.repository.get_alerts_by_project(project_id)?;
        if alerts.is_empty() {
            return Ok(Vec::new());
        }

        let project = self.project_repository.get_project(project_id)?;
        let expenses = self.expense_repository.get_expenses_by_project(project_id)?;
        let professionals = self
            .professional_repository
            .get_professionals_by_project(project_id)?;
        let total_spent = compute_totals(&expenses).total_spent;
        let labor = ProjectLaborBalances::compute(project_id, &professionals, &expenses);

        let evaluations: Vec<AlertEvaluation> = alerts
            .iter()
            .map(|alert| evaluate_alert(alert, &project, total_spent, &labor.balances, today))
            .collect();
        debug!(
            "Evaluated {} alerts on project {}, {} triggered",
            evaluations.len(),
            project_id,
            evaluations.iter().filter(|e| e.triggered).count()
        );
        Ok(evaluations)
    }

    async fn create_alert(&self, new_alert: NewAlert) -> Result<Alert> {
        new_alert.validate()?;
        self.check_alert_target(&new_alert.project_id, &new_alert.kind)?;
        let alert = self.repository.create_alert(new_alert).await?;
        info!("Created alert {} on project {}", alert.id, alert.project_id);
        Ok(alert)
    }

    async fn update_alert(&self, alert: Alert) -> Result<Alert> {
        alert.validate()?;
        let existing = self.repository.get_alert(&alert.id)?;
        if existing.project_id != alert.project_id {
            return Err(Error::invalid_input(format!(
                "Alert {} cannot move to another project",
                alert.id
            )));
        }
        self.check_alert_target(&alert.project_id, &alert.kind)?;
        self.repository.update_alert(alert).await
    }

    async fn set_alert_active(&self, alert_id: &str, active: bool) -> Result<Alert> {
        let mut alert = self.repository.get_alert(alert_id)?;
        alert.active = active;
        self.repository.update_alert(alert).await
    }

    async fn delete_alert(&self, alert_id: &str) -> Result<usize> {
        let removed = self.repository.delete_alert(alert_id).await?;
        if removed == 0 {
            return Err(Error::not_found(format!("Alert {}", alert_id)));
        }
        Ok(removed)
    }
}
