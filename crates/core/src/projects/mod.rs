//! Projects module - construction projects, schedule status and cascade deletion.

mod projects_model;
mod projects_service;
mod projects_traits;

pub use projects_model::{
    Location, NewProject, Project, ProjectDeletion, ProjectType, ScheduleStatus,
};
pub use projects_service::ProjectService;
pub use projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
