use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::projects::ProjectRepositoryTrait;
use crate::session::session_model::ProjectContext;
use crate::session::session_traits::{SessionRepositoryTrait, SessionServiceTrait};

pub struct SessionService {
    repository: Arc<dyn SessionRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
}

impl SessionService {
    pub fn new(
        repository: Arc<dyn SessionRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
    ) -> Self {
        SessionService {
            repository,
            project_repository,
        }
    }
}

#[async_trait]
impl SessionServiceTrait for SessionService {
    fn current_context(&self, owner_id: &str) -> Result<Option<ProjectContext>> {
        let Some(project_id) = self.repository.get_active_project_id()? else {
            return Ok(None);
        };

        match self.project_repository.get_project(&project_id) {
            Ok(project) if project.is_owned_by(owner_id) => Ok(Some(ProjectContext {
                owner_id: owner_id.to_string(),
                project,
            })),
            Ok(_) => {
                debug!(
                    "Active project {} does not belong to owner {}",
                    project_id, owner_id
                );
                Ok(None)
            }
            Err(err) if err.is_not_found() => {
                warn!("Active project {} no longer exists", project_id);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn activate_project(&self, owner_id: &str, project_id: &str) -> Result<ProjectContext> {
        let project = self.project_repository.get_project(project_id)?;
        if !project.is_owned_by(owner_id) {
            return Err(Error::invalid_input(format!(
                "Project {} does not belong to owner {}",
                project_id, owner_id
            )));
        }
        self.repository
            .set_active_project_id(Some(project.id.clone()))
            .await?;
        debug!("Activated project {} for owner {}", project.id, owner_id);
        Ok(ProjectContext {
            owner_id: owner_id.to_string(),
            project,
        })
    }

    async fn clear_active_project(&self) -> Result<()> {
        self.repository.set_active_project_id(None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_project, InMemoryRepositories};

    fn setup() -> (Arc<InMemoryRepositories>, SessionService) {
        let repos = Arc::new(InMemoryRepositories::default());
        repos.insert_project(sample_project("p1", "owner-1"));
        repos.insert_project(sample_project("p2", "owner-2"));
        let service = SessionService::new(repos.clone(), repos.clone());
        (repos, service)
    }

    #[tokio::test]
    async fn test_activate_and_resolve_context() {
        let (_repos, service) = setup();
        assert!(service.current_context("owner-1").unwrap().is_none());

        let context = service.activate_project("owner-1", "p1").await.unwrap();
        assert_eq!(context.project_id(), "p1");

        let current = service.current_context("owner-1").unwrap().unwrap();
        assert_eq!(current.project_id(), "p1");
        assert!(service.current_context("owner-2").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cannot_activate_foreign_project() {
        let (repos, service) = setup();
        assert!(service.activate_project("owner-1", "p2").await.is_err());
        assert_eq!(repos.active_project_id(), None);
    }

    #[tokio::test]
    async fn test_dangling_pointer_resolves_to_none() {
        let (repos, service) = setup();
        repos
            .set_active_project_id(Some("deleted".to_string()))
            .await
            .unwrap();
        assert!(service.current_context("owner-1").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_active_project() {
        let (repos, service) = setup();
        service.activate_project("owner-1", "p1").await.unwrap();
        service.clear_active_project().await.unwrap();
        assert_eq!(repos.active_project_id(), None);
    }
}
