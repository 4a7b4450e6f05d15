//! Project domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::days_between;

/// Kind of construction work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    NewBuild,
    #[default]
    Renovation,
}

impl ProjectType {
    /// Parses a stored type literal, accepting the legacy Portuguese names.
    ///
    /// Anything that is not a new build is treated as a renovation.
    pub fn parse(literal: &str) -> Self {
        match literal.trim().to_lowercase().as_str() {
            "new_build" | "construcao" | "construção" => ProjectType::NewBuild,
            _ => ProjectType::Renovation,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::NewBuild => "new_build",
            ProjectType::Renovation => "renovation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub state: String,
    pub city: String,
    pub neighborhood: Option<String>,
}

/// Domain model representing a construction project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub project_type: ProjectType,
    /// Built area in square meters.
    pub area: Decimal,
    pub location: Location,
    pub budget: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: Option<NaiveDateTime>,
}

/// Input model for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub id: Option<String>,
    pub owner_id: String,
    pub name: String,
    pub project_type: ProjectType,
    pub area: Decimal,
    pub location: Location,
    pub budget: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Days left until the planned end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStatus {
    pub end_date: NaiveDate,
    /// Absolute distance to the end date in days.
    pub days: i64,
    pub overdue: bool,
}

/// Counts of dependent records removed together with a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeletion {
    pub projects_removed: usize,
    pub expenses_removed: usize,
    pub professionals_removed: usize,
    pub alerts_removed: usize,
    pub active_pointer_cleared: bool,
}

fn validate_project_fields(
    owner_id: &str,
    name: &str,
    area: Decimal,
    location: &Location,
    budget: Option<Decimal>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<()> {
    if owner_id.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "ownerId".to_string(),
        )));
    }
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    if area <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "Project area must be greater than zero, got {}",
            area
        )));
    }
    if location.state.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "location.state".to_string(),
        )));
    }
    if location.city.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "location.city".to_string(),
        )));
    }
    if let Some(budget) = budget {
        if budget < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NegativeAmount(budget)));
        }
    }
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(Error::invalid_input(format!(
                "Project end date {} is before its start date {}",
                end, start
            )));
        }
    }
    Ok(())
}

impl NewProject {
    pub fn validate(&self) -> Result<()> {
        validate_project_fields(
            &self.owner_id,
            &self.name,
            self.area,
            &self.location,
            self.budget,
            self.start_date,
            self.end_date,
        )
    }

    pub fn into_project(self, id: String, created_at: NaiveDateTime) -> Project {
        Project {
            id,
            owner_id: self.owner_id,
            name: self.name.trim().to_string(),
            project_type: self.project_type,
            area: self.area,
            location: self.location,
            budget: self.budget,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: Some(created_at),
        }
    }
}

impl Project {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        validate_project_fields(
            &self.owner_id,
            &self.name,
            self.area,
            &self.location,
            self.budget,
            self.start_date,
            self.end_date,
        )
    }

    /// Budget usable as a denominator: set and strictly positive.
    pub fn effective_budget(&self) -> Option<Decimal> {
        self.budget.filter(|budget| *budget > Decimal::ZERO)
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }

    /// Distance from `today` to the planned end date, `None` when no end date is set.
    pub fn schedule_status(&self, today: NaiveDate) -> Option<ScheduleStatus> {
        self.end_date.map(|end_date| {
            let remaining = days_between(today, end_date);
            ScheduleStatus {
                end_date,
                days: remaining.abs(),
                overdue: remaining < 0,
            }
        })
    }
}
