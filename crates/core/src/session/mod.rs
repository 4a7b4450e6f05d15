//! Session module - resolves the active project into an explicit context.

mod session_model;
mod session_service;
mod session_traits;

pub use session_model::ProjectContext;
pub use session_service::SessionService;
pub use session_traits::{SessionRepositoryTrait, SessionServiceTrait};
