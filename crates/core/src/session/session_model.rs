use serde::{Deserialize, Serialize};

use crate::projects::Project;

/// The project a user is working on, passed explicitly to consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub owner_id: String,
    pub project: Project,
}

impl ProjectContext {
    pub fn project_id(&self) -> &str {
        &self.project.id
    }
}
