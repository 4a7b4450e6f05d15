use async_trait::async_trait;

use crate::errors::Result;
use crate::expenses::Expense;
use crate::professionals::contract_model::Contract;
use crate::professionals::professionals_model::{
    NewPayment, NewProfessional, Professional, ProfessionalBalance, ProjectLaborBalances,
};

/// Trait for professional repository operations
#[async_trait]
pub trait ProfessionalRepositoryTrait: Send + Sync {
    fn get_professional(&self, professional_id: &str) -> Result<Professional>;
    fn get_professionals_by_project(&self, project_id: &str) -> Result<Vec<Professional>>;
    async fn create_professional(&self, new_professional: NewProfessional) -> Result<Professional>;
    async fn update_professional(&self, professional: Professional) -> Result<Professional>;
    async fn delete_professional(&self, professional_id: &str) -> Result<usize>;
}

/// Trait for professional service operations
#[async_trait]
pub trait ProfessionalServiceTrait: Send + Sync {
    fn get_professional(&self, professional_id: &str) -> Result<Professional>;
    fn get_project_professionals(&self, project_id: &str) -> Result<Vec<Professional>>;
    fn get_balance(&self, professional_id: &str) -> Result<ProfessionalBalance>;
    fn get_project_balances(&self, project_id: &str) -> Result<ProjectLaborBalances>;
    async fn create_professional(&self, new_professional: NewProfessional) -> Result<Professional>;
    async fn update_professional(&self, professional: Professional) -> Result<Professional>;
    async fn delete_professional(&self, professional_id: &str) -> Result<usize>;
    /// Validates and attaches a contract, storing its resolved expected total.
    async fn save_contract(&self, professional_id: &str, contract: Contract) -> Result<Professional>;
    async fn remove_contract(&self, professional_id: &str) -> Result<Professional>;
    /// Records a labor expense paid to the professional.
    async fn register_payment(&self, professional_id: &str, payment: NewPayment) -> Result<Expense>;
}
