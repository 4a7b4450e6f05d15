//! Professionals module - hired workers, their contracts and labor balances.

mod contract_model;
mod professionals_errors;
mod professionals_model;
mod professionals_service;
mod professionals_traits;

pub use contract_model::{Contract, PricingModel, PricingModelKind, Stage};
pub use professionals_errors::ContractError;
pub use professionals_model::{
    NewPayment, NewProfessional, Professional, ProfessionalBalance, ProjectLaborBalances,
};
pub use professionals_service::ProfessionalService;
pub use professionals_traits::{ProfessionalRepositoryTrait, ProfessionalServiceTrait};
