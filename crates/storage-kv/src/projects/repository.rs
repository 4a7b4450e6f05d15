use async_trait::async_trait;
use log::{debug, info};
use obra_core::errors::{Error, Result};
use obra_core::projects::{NewProject, Project, ProjectDeletion, ProjectRepositoryTrait};
use uuid::Uuid;

use super::model::ProjectRecord;
use crate::db::{read_collection, StorePool, WriteHandle};
use crate::errors::IntoCore;
use crate::utils::stored_now;
use crate::schema::{
    ACTIVE_PROJECT_KEY, ALERTS_KEY, EXPENSES_KEY, PROFESSIONALS_KEY, PROJECTS_KEY,
};

pub struct ProjectRepository {
    pool: StorePool,
    writer: WriteHandle,
}

impl ProjectRepository {
    pub fn new(pool: StorePool, writer: WriteHandle) -> Self {
        ProjectRepository { pool, writer }
    }

    pub fn load_projects_impl(&self) -> Result<Vec<Project>> {
        let collection = read_collection(&self.pool, PROJECTS_KEY)?;
        Ok(collection
            .decode::<ProjectRecord>()
            .into_iter()
            .map(Project::from)
            .collect())
    }
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    fn get_project(&self, project_id: &str) -> Result<Project> {
        read_collection(&self.pool, PROJECTS_KEY)?
            .find::<ProjectRecord>(project_id)
            .map(Project::from)
            .ok_or_else(|| Error::not_found(format!("Project {}", project_id)))
    }

    fn get_projects(&self) -> Result<Vec<Project>> {
        self.load_projects_impl()
    }

    fn get_projects_by_owner(&self, owner_id: &str) -> Result<Vec<Project>> {
        Ok(self
            .load_projects_impl()?
            .into_iter()
            .filter(|project| project.is_owned_by(owner_id))
            .collect())
    }

    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        self.writer
            .exec(move |txn| {
                let mut projects = txn.load_collection(PROJECTS_KEY)?;
                let id = new_project
                    .id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                if projects.contains(&id) {
                    return Err(Error::invalid_input(format!(
                        "Project {} already exists",
                        id
                    )));
                }

                let project = new_project.into_project(id, stored_now());
                let value = serde_json::to_value(ProjectRecord::from(project.clone())).into_core()?;
                projects.push(value);
                txn.store_collection(&projects)?;
                info!("Created project {} ({})", project.id, project.name);
                Ok(project)
            })
            .await
    }

    async fn update_project(&self, project: Project) -> Result<Project> {
        self.writer
            .exec(move |txn| {
                let mut projects = txn.load_collection(PROJECTS_KEY)?;
                let value = serde_json::to_value(ProjectRecord::from(project.clone())).into_core()?;
                if !projects.replace(&project.id, value) {
                    return Err(Error::not_found(format!("Project {}", project.id)));
                }
                txn.store_collection(&projects)?;
                debug!("Updated project {}", project.id);
                Ok(project)
            })
            .await
    }

    async fn delete_project(&self, project_id: &str) -> Result<ProjectDeletion> {
        let project_id = project_id.to_string();
        self.writer
            .exec(move |txn| {
                let mut deletion = ProjectDeletion::default();

                let mut projects = txn.load_collection(PROJECTS_KEY)?;
                deletion.projects_removed = projects.remove_by_id(&project_id);
                if deletion.projects_removed == 0 {
                    return Ok(deletion);
                }
                txn.store_collection(&projects)?;

                let mut expenses = txn.load_collection(EXPENSES_KEY)?;
                deletion.expenses_removed = expenses.remove_where_project(&project_id);
                if deletion.expenses_removed > 0 {
                    txn.store_collection(&expenses)?;
                }

                let mut professionals = txn.load_collection(PROFESSIONALS_KEY)?;
                deletion.professionals_removed = professionals.remove_where_project(&project_id);
                if deletion.professionals_removed > 0 {
                    txn.store_collection(&professionals)?;
                }

                let mut alerts = txn.load_collection(ALERTS_KEY)?;
                deletion.alerts_removed = alerts.remove_where_project(&project_id);
                if deletion.alerts_removed > 0 {
                    txn.store_collection(&alerts)?;
                }

                if txn.get_pointer(ACTIVE_PROJECT_KEY)?.as_deref() == Some(project_id.as_str()) {
                    txn.set_pointer(ACTIVE_PROJECT_KEY, None)?;
                    deletion.active_pointer_cleared = true;
                }

                info!(
                    "Deleted project {} with {} expenses, {} professionals and {} alerts",
                    project_id,
                    deletion.expenses_removed,
                    deletion.professionals_removed,
                    deletion.alerts_removed
                );
                Ok(deletion)
            })
            .await
    }
}
