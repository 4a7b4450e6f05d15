use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};

use crate::errors::{Error, Result};
use crate::projects::projects_model::{
    NewProject, Project, ProjectDeletion, ScheduleStatus,
};
use crate::projects::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};

pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
}

impl ProjectService {
    pub fn new(repository: Arc<dyn ProjectRepositoryTrait>) -> Self {
        ProjectService { repository }
    }
}

#[async_trait]
impl ProjectServiceTrait for ProjectService {
    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.repository.get_project(project_id)
    }

    fn get_projects_for_owner(&self, owner_id: &str) -> Result<Vec<Project>> {
        let mut projects = self.repository.get_projects_by_owner(owner_id)?;
        projects.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(projects)
    }

    fn get_schedule_status(
        &self,
        project_id: &str,
        today: NaiveDate,
    ) -> Result<Option<ScheduleStatus>> {
        let project = self.repository.get_project(project_id)?;
        Ok(project.schedule_status(today))
    }

    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        new_project.validate()?;
        let project = self.repository.create_project(new_project).await?;
        info!("Created project {} ({})", project.id, project.name);
        Ok(project)
    }

    async fn update_project(&self, project: Project) -> Result<Project> {
        project.validate()?;
        let existing = self.repository.get_project(&project.id)?;
        if existing.owner_id != project.owner_id {
            return Err(Error::invalid_input(format!(
                "Project {} cannot change owner",
                project.id
            )));
        }
        debug!("Updating project {}", project.id);
        self.repository.update_project(project).await
    }

    async fn delete_project(&self, project_id: &str) -> Result<ProjectDeletion> {
        let deletion = self.repository.delete_project(project_id).await?;
        if deletion.projects_removed == 0 {
            return Err(Error::not_found(format!("Project {}", project_id)));
        }
        info!(
            "Deleted project {} with {} expenses, {} professionals and {} alerts",
            project_id,
            deletion.expenses_removed,
            deletion.professionals_removed,
            deletion.alerts_removed
        );
        Ok(deletion)
    }
}
