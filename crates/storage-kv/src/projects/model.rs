//! Stored shape of projects.

use obra_core::projects::{Location, Project, ProjectType};
use obra_core::utils::time_utils::{format_calendar_date, format_timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::{de_id, de_opt_decimal, read_date, read_timestamp};

/// Project as persisted under the `projects` key.
///
/// Reads accept the field names written by earlier versions (`nome`,
/// `userId`, `orcamento`, ...); writes always use the canonical names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "userId", default)]
    pub owner_id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "tipo", default)]
    pub project_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub area: Option<Decimal>,
    #[serde(alias = "localizacao", default)]
    pub location: LocationRecord,
    #[serde(alias = "orcamento", default, deserialize_with = "de_opt_decimal")]
    pub budget: Option<Decimal>,
    #[serde(alias = "dataInicio", default)]
    pub start_date: Option<String>,
    #[serde(alias = "dataTermino", default)]
    pub end_date: Option<String>,
    #[serde(alias = "criadaEm", default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    #[serde(alias = "estado", default)]
    pub state: String,
    #[serde(alias = "cidade", default)]
    pub city: String,
    #[serde(alias = "bairro", default)]
    pub neighborhood: Option<String>,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        let start_date = read_date(&record.id, "startDate", record.start_date.as_deref());
        let end_date = read_date(&record.id, "endDate", record.end_date.as_deref());
        let created_at = read_timestamp(&record.id, "createdAt", record.created_at.as_deref());
        Project {
            project_type: record
                .project_type
                .as_deref()
                .map(ProjectType::parse)
                .unwrap_or_default(),
            area: record.area.unwrap_or(Decimal::ZERO),
            location: Location {
                state: record.location.state,
                city: record.location.city,
                neighborhood: record
                    .location
                    .neighborhood
                    .filter(|n| !n.trim().is_empty()),
            },
            budget: record.budget,
            start_date,
            end_date,
            created_at,
            id: record.id,
            owner_id: record.owner_id,
            name: record.name,
        }
    }
}

impl From<Project> for ProjectRecord {
    fn from(project: Project) -> Self {
        ProjectRecord {
            id: project.id,
            owner_id: project.owner_id,
            name: project.name,
            project_type: Some(project.project_type.as_str().to_string()),
            area: Some(project.area),
            location: LocationRecord {
                state: project.location.state,
                city: project.location.city,
                neighborhood: project.location.neighborhood,
            },
            budget: project.budget,
            start_date: project.start_date.map(format_calendar_date),
            end_date: project.end_date.map(format_calendar_date),
            created_at: project.created_at.map(format_timestamp),
        }
    }
}
