use async_trait::async_trait;
use log::{debug, info};
use obra_core::errors::{Error, Result};
use obra_core::professionals::{NewProfessional, Professional, ProfessionalRepositoryTrait};
use uuid::Uuid;

use super::model::ProfessionalRecord;
use crate::db::{read_collection, StorePool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::PROFESSIONALS_KEY;

pub struct ProfessionalRepository {
    pool: StorePool,
    writer: WriteHandle,
}

fn to_value(professional: &Professional) -> Result<serde_json::Value> {
    serde_json::to_value(ProfessionalRecord::from(professional.clone())).into_core()
}

impl ProfessionalRepository {
    pub fn new(pool: StorePool, writer: WriteHandle) -> Self {
        ProfessionalRepository { pool, writer }
    }

    pub fn load_professionals_impl(&self) -> Result<Vec<Professional>> {
        let collection = read_collection(&self.pool, PROFESSIONALS_KEY)?;
        Ok(collection
            .decode::<ProfessionalRecord>()
            .into_iter()
            .map(Professional::from)
            .collect())
    }
}

#[async_trait]
impl ProfessionalRepositoryTrait for ProfessionalRepository {
    fn get_professional(&self, professional_id: &str) -> Result<Professional> {
        read_collection(&self.pool, PROFESSIONALS_KEY)?
            .find::<ProfessionalRecord>(professional_id)
            .map(Professional::from)
            .ok_or_else(|| Error::not_found(format!("Professional {}", professional_id)))
    }

    fn get_professionals_by_project(&self, project_id: &str) -> Result<Vec<Professional>> {
        Ok(self
            .load_professionals_impl()?
            .into_iter()
            .filter(|professional| professional.project_id == project_id)
            .collect())
    }

    async fn create_professional(&self, new_professional: NewProfessional) -> Result<Professional> {
        self.writer
            .exec(move |txn| {
                let mut professionals = txn.load_collection(PROFESSIONALS_KEY)?;
                let id = new_professional
                    .id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                if professionals.contains(&id) {
                    return Err(Error::invalid_input(format!(
                        "Professional {} already exists",
                        id
                    )));
                }

                let professional = new_professional.into_professional(id);
                professionals.push(to_value(&professional)?);
                txn.store_collection(&professionals)?;
                info!(
                    "Registered professional {} ({}) on project {}",
                    professional.id, professional.role, professional.project_id
                );
                Ok(professional)
            })
            .await
    }

    async fn update_professional(&self, professional: Professional) -> Result<Professional> {
        self.writer
            .exec(move |txn| {
                let mut professionals = txn.load_collection(PROFESSIONALS_KEY)?;
                if !professionals.replace(&professional.id, to_value(&professional)?) {
                    return Err(Error::not_found(format!(
                        "Professional {}",
                        professional.id
                    )));
                }
                txn.store_collection(&professionals)?;
                debug!("Updated professional {}", professional.id);
                Ok(professional)
            })
            .await
    }

    async fn delete_professional(&self, professional_id: &str) -> Result<usize> {
        let professional_id = professional_id.to_string();
        self.writer
            .exec(move |txn| {
                let mut professionals = txn.load_collection(PROFESSIONALS_KEY)?;
                let removed = professionals.remove_by_id(&professional_id);
                if removed > 0 {
                    txn.store_collection(&professionals)?;
                    debug!("Deleted professional {}", professional_id);
                }
                Ok(removed)
            })
            .await
    }
}
