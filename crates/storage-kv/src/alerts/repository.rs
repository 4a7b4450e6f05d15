use async_trait::async_trait;
use log::{debug, info};
use obra_core::alerts::{Alert, AlertRepositoryTrait, NewAlert};
use obra_core::errors::{Error, Result};
use uuid::Uuid;

use super::model::AlertRecord;
use crate::db::{read_collection, StorePool, WriteHandle};
use crate::errors::IntoCore;
use crate::utils::stored_now;
use crate::schema::ALERTS_KEY;

pub struct AlertRepository {
    pool: StorePool,
    writer: WriteHandle,
}

fn to_value(alert: &Alert) -> Result<serde_json::Value> {
    serde_json::to_value(AlertRecord::from(alert.clone())).into_core()
}

impl AlertRepository {
    pub fn new(pool: StorePool, writer: WriteHandle) -> Self {
        AlertRepository { pool, writer }
    }

    pub fn load_alerts_impl(&self) -> Result<Vec<Alert>> {
        let collection = read_collection(&self.pool, ALERTS_KEY)?;
        Ok(collection
            .decode::<AlertRecord>()
            .into_iter()
            .map(Alert::from)
            .collect())
    }
}

#[async_trait]
impl AlertRepositoryTrait for AlertRepository {
    fn get_alert(&self, alert_id: &str) -> Result<Alert> {
        read_collection(&self.pool, ALERTS_KEY)?
            .find::<AlertRecord>(alert_id)
            .map(Alert::from)
            .ok_or_else(|| Error::not_found(format!("Alert {}", alert_id)))
    }

    fn get_alerts_by_project(&self, project_id: &str) -> Result<Vec<Alert>> {
        Ok(self
            .load_alerts_impl()?
            .into_iter()
            .filter(|alert| alert.project_id == project_id)
            .collect())
    }

    async fn create_alert(&self, new_alert: NewAlert) -> Result<Alert> {
        self.writer
            .exec(move |txn| {
                let mut alerts = txn.load_collection(ALERTS_KEY)?;
                let id = new_alert
                    .id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                if alerts.contains(&id) {
                    return Err(Error::invalid_input(format!("Alert {} already exists", id)));
                }

                let alert = new_alert.into_alert(id, stored_now());
                alerts.push(to_value(&alert)?);
                txn.store_collection(&alerts)?;
                info!("Created alert {} on project {}", alert.id, alert.project_id);
                Ok(alert)
            })
            .await
    }

    async fn update_alert(&self, alert: Alert) -> Result<Alert> {
        self.writer
            .exec(move |txn| {
                let mut alerts = txn.load_collection(ALERTS_KEY)?;
                if !alerts.replace(&alert.id, to_value(&alert)?) {
                    return Err(Error::not_found(format!("Alert {}", alert.id)));
                }
                txn.store_collection(&alerts)?;
                debug!("Updated alert {}", alert.id);
                Ok(alert)
            })
            .await
    }

    async fn delete_alert(&self, alert_id: &str) -> Result<usize> {
        let alert_id = alert_id.to_string();
        self.writer
            .exec(move |txn| {
                let mut alerts = txn.load_collection(ALERTS_KEY)?;
                let removed = alerts.remove_by_id(&alert_id);
                if removed > 0 {
                    txn.store_collection(&alerts)?;
                    debug!("Deleted alert {}", alert_id);
                }
                Ok(removed)
            })
            .await
    }
}
