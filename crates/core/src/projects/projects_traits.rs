use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::projects::projects_model::{
    NewProject, Project, ProjectDeletion, ScheduleStatus,
};

/// Trait for project repository operations
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    fn get_project(&self, project_id: &str) -> Result<Project>;
    fn get_projects(&self) -> Result<Vec<Project>>;
    fn get_projects_by_owner(&self, owner_id: &str) -> Result<Vec<Project>>;
    async fn create_project(&self, new_project: NewProject) -> Result<Project>;
    async fn update_project(&self, project: Project) -> Result<Project>;
    /// Removes the project with its expenses, professionals and alerts in one
    /// transaction, clearing the active-project pointer when it points here.
    async fn delete_project(&self, project_id: &str) -> Result<ProjectDeletion>;
}

/// Trait for project service operations
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    fn get_project(&self, project_id: &str) -> Result<Project>;
    fn get_projects_for_owner(&self, owner_id: &str) -> Result<Vec<Project>>;
    fn get_schedule_status(
        &self,
        project_id: &str,
        today: NaiveDate,
    ) -> Result<Option<ScheduleStatus>>;
    async fn create_project(&self, new_project: NewProject) -> Result<Project>;
    async fn update_project(&self, project: Project) -> Result<Project>;
    async fn delete_project(&self, project_id: &str) -> Result<ProjectDeletion>;
}
