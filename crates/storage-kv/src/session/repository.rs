use async_trait::async_trait;
use log::debug;
use obra_core::errors::Result;
use obra_core::session::SessionRepositoryTrait;

use crate::db::{read_pointer, StorePool, WriteHandle};
use crate::schema::ACTIVE_PROJECT_KEY;

/// The pointer is a bare identifier string, not JSON.
pub struct SessionRepository {
    pool: StorePool,
    writer: WriteHandle,
}

impl SessionRepository {
    pub fn new(pool: StorePool, writer: WriteHandle) -> Self {
        SessionRepository { pool, writer }
    }
}

#[async_trait]
impl SessionRepositoryTrait for SessionRepository {
    fn get_active_project_id(&self) -> Result<Option<String>> {
        read_pointer(&self.pool, ACTIVE_PROJECT_KEY)
    }

    async fn set_active_project_id(&self, project_id: Option<String>) -> Result<()> {
        let project_id = project_id.filter(|id| !id.trim().is_empty());
        self.writer
            .exec(move |txn| {
                debug!("Setting active project to {:?}", project_id);
                txn.set_pointer(ACTIVE_PROJECT_KEY, project_id)
            })
            .await
    }
}
