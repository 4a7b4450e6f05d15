//! Alerts module - budget, deadline and payment alerts and their evaluation.

mod alerts_evaluator;
mod alerts_model;
mod alerts_service;
mod alerts_traits;

pub use alerts_evaluator::evaluate_alert;
pub use alerts_model::{Alert, AlertEvaluation, AlertKind, NewAlert};
pub use alerts_service::AlertService;
pub use alerts_traits::{AlertRepositoryTrait, AlertServiceTrait};
