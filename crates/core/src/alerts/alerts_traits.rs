use async_trait::async_trait;
use chrono::NaiveDate;

use crate::alerts::alerts_model::{Alert, AlertEvaluation, NewAlert};
use crate::errors::Result;

/// Trait for alert repository operations
#[async_trait]
pub trait AlertRepositoryTrait: Send + Sync {
    fn get_alert(&self, alert_id: &str) -> Result<Alert>;
    fn get_alerts_by_project(&self, project_id: &str) -> Result<Vec<Alert>>;
    async fn create_alert(&self, new_alert: NewAlert) -> Result<Alert>;
    async fn update_alert(&self, alert: Alert) -> Result<Alert>;
    async fn delete_alert(&self, alert_id: &str) -> Result<usize>;
}

/// Trait for alert service operations
#[async_trait]
pub trait AlertServiceTrait: Send + Sync {
    fn get_project_alerts(&self, project_id: &str) -> Result<Vec<Alert>>;
    fn evaluate_project_alerts(&self, project_id: &str, today: NaiveDate) -> Result<Vec<AlertEvaluation>>;
    async fn create_alert(&self, new_alert: NewAlert) -> Result<Alert>;
    async fn update_alert(&self, alert: Alert) -> Result<Alert>;
    async fn set_alert_active(&self, alert_id: &str, active: bool) -> Result<Alert>;
    async fn delete_alert(&self, alert_id: &str) -> Result<usize>;
}
