//! Stored shape of alerts.

use obra_core::alerts::{Alert, AlertKind};
use obra_core::utils::time_utils::format_timestamp;
use serde::{Deserialize, Serialize};

use crate::utils::{de_id, read_timestamp};

/// Alert as persisted under the `alerts` key, with its kind flattened in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "obraId", deserialize_with = "de_id")]
    pub project_id: String,
    #[serde(flatten)]
    pub kind: AlertKind,
    #[serde(alias = "ativo", default = "default_active")]
    pub active: bool,
    #[serde(alias = "criadoEm", default)]
    pub created_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl From<AlertRecord> for Alert {
    fn from(record: AlertRecord) -> Self {
        let created_at = read_timestamp(&record.id, "createdAt", record.created_at.as_deref());
        Alert {
            id: record.id,
            project_id: record.project_id,
            kind: record.kind,
            active: record.active,
            created_at,
        }
    }
}

impl From<Alert> for AlertRecord {
    fn from(alert: Alert) -> Self {
        AlertRecord {
            id: alert.id,
            project_id: alert.project_id,
            kind: alert.kind,
            active: alert.active,
            created_at: alert.created_at.map(format_timestamp),
        }
    }
}
