use async_trait::async_trait;

use crate::errors::Result;
use crate::session::session_model::ProjectContext;

/// Storage of the active-project pointer
#[async_trait]
pub trait SessionRepositoryTrait: Send + Sync {
    fn get_active_project_id(&self) -> Result<Option<String>>;
    async fn set_active_project_id(&self, project_id: Option<String>) -> Result<()>;
}

/// Trait for session operations
#[async_trait]
pub trait SessionServiceTrait: Send + Sync {
    /// The active project of `owner_id`, if one is set and still valid.
    fn current_context(&self, owner_id: &str) -> Result<Option<ProjectContext>>;
    async fn activate_project(&self, owner_id: &str, project_id: &str) -> Result<ProjectContext>;
    async fn clear_active_project(&self) -> Result<()>;
}
