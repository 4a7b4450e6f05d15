//! Report domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::expenses::Expense;
use crate::professionals::Professional;
use crate::projects::Project;
use crate::reports::report_filter::{apply_report_filter, filter_by_period, sort_by_date};
use crate::reports::reports_errors::ReportError;
use crate::summary::{
    compute_distribution, compute_totals, cost_per_area, remaining_balance, CostDistribution,
};
use crate::utils::decimal::saturating_sum;
use crate::utils::time_utils::format_display_date;

/// Kind of report, accepting the legacy Portuguese names on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[default]
    #[serde(alias = "geral")]
    General,
    #[serde(alias = "periodo")]
    Period,
    Material,
    #[serde(alias = "mao_obra_total")]
    LaborTotal,
    #[serde(alias = "mao_obra_profissional")]
    LaborByProfessional,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::General => "general",
            ReportType::Period => "period",
            ReportType::Material => "material",
            ReportType::LaborTotal => "labor_total",
            ReportType::LaborByProfessional => "labor_by_professional",
        }
    }
}

impl FromStr for ReportType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "general" | "geral" => Ok(ReportType::General),
            "period" | "periodo" => Ok(ReportType::Period),
            "material" => Ok(ReportType::Material),
            "labor_total" | "mao_obra_total" => Ok(ReportType::LaborTotal),
            "labor_by_professional" | "mao_obra_profissional" => {
                Ok(ReportType::LaborByProfessional)
            }
            other => Err(Error::invalid_input(format!("Unknown report type '{}'", other))),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report parameters as submitted by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub project_id: String,
    pub report_type: ReportType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub professional_id: Option<String>,
}

impl ReportRequest {
    /// Checks the parameters the report type needs and returns the filter to apply.
    pub fn validate(&self) -> Result<ReportFilter> {
        if self.project_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "projectId".to_string(),
            )));
        }
        let filter = match self.report_type {
            ReportType::General => ReportFilter::General,
            ReportType::Period => match (self.start_date, self.end_date) {
                (Some(start), Some(end)) => ReportFilter::Period { start, end },
                _ => return Err(ReportError::MissingDateRange.into()),
            },
            ReportType::Material => ReportFilter::Material,
            ReportType::LaborTotal => ReportFilter::LaborTotal,
            ReportType::LaborByProfessional => {
                match self
                    .professional_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                {
                    Some(id) => ReportFilter::LaborByProfessional {
                        professional_id: id.to_string(),
                    },
                    None => return Err(ReportError::MissingProfessional.into()),
                }
            }
        };
        Ok(filter)
    }
}

/// A validated report request. Holding one means the required parameters are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportFilter {
    General,
    Period {
        start: NaiveDate,
        end: NaiveDate,
    },
    Material,
    LaborTotal,
    LaborByProfessional {
        #[serde(rename = "professionalId")]
        professional_id: String,
    },
}

impl ReportFilter {
    pub fn report_type(&self) -> ReportType {
        match self {
            ReportFilter::General => ReportType::General,
            ReportFilter::Period { .. } => ReportType::Period,
            ReportFilter::Material => ReportType::Material,
            ReportFilter::LaborTotal => ReportType::LaborTotal,
            ReportFilter::LaborByProfessional { .. } => ReportType::LaborByProfessional,
        }
    }

    pub fn period(&self) -> Option<ReportPeriod> {
        match self {
            ReportFilter::Period { start, end } => Some(ReportPeriod {
                start: *start,
                end: *end,
            }),
            _ => None,
        }
    }

    pub fn professional_id(&self) -> Option<&str> {
        match self {
            ReportFilter::LaborByProfessional { professional_id } => Some(professional_id),
            _ => None,
        }
    }

    /// Whether the report shows the labor vs material/other split.
    pub fn includes_distribution(&self) -> bool {
        matches!(self, ReportFilter::General | ReportFilter::Period { .. })
    }

    pub fn lists_professionals(&self) -> bool {
        matches!(self, ReportFilter::General)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportProfessionalLine {
    pub professional_id: String,
    pub name: String,
    pub role: String,
    pub expected_amount: Decimal,
}

/// A generated report, ready for display or printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub project: Project,
    pub report_type: ReportType,
    pub title: String,
    pub period: Option<ReportPeriod>,
    pub professional: Option<Professional>,
    pub expenses: Vec<Expense>,
    pub total_spent: Decimal,
    pub remaining_balance: Option<Decimal>,
    pub cost_per_area: Decimal,
    pub distribution: Option<CostDistribution>,
    pub professionals: Vec<ReportProfessionalLine>,
    pub generated_at: NaiveDateTime,
}

fn report_title(filter: &ReportFilter, professional: Option<&Professional>) -> String {
    match filter {
        ReportFilter::General => "General Project Report".to_string(),
        ReportFilter::Period { start, end } => format!(
            "Period Report ({} to {})",
            format_display_date(*start),
            format_display_date(*end)
        ),
        ReportFilter::Material => "Material and Other Expenses Report".to_string(),
        ReportFilter::LaborTotal => "Labor Report (Total)".to_string(),
        ReportFilter::LaborByProfessional { professional_id } => match professional {
            Some(professional) => format!(
                "Labor Report - {} ({})",
                professional.name, professional.role
            ),
            None => format!("Labor Report - {}", professional_id),
        },
    }
}

/// Assembles a report from already loaded project data.
pub fn build_report(
    project: &Project,
    expenses: Vec<Expense>,
    professionals: &[Professional],
    filter: &ReportFilter,
    generated_at: NaiveDateTime,
) -> Report {
    let distribution = if filter.includes_distribution() {
        let in_period = filter_by_period(expenses.clone(), filter);
        Some(compute_distribution(&compute_totals(&in_period), project.budget))
    } else {
        None
    };

    let mut filtered = apply_report_filter(expenses, filter);
    sort_by_date(&mut filtered);
    let total_spent = saturating_sum(filtered.iter().map(|expense| expense.amount));

    let professional = filter
        .professional_id()
        .and_then(|id| professionals.iter().find(|p| p.id == id))
        .cloned();

    let professional_lines = if filter.lists_professionals() {
        professionals
            .iter()
            .map(|p| ReportProfessionalLine {
                professional_id: p.id.clone(),
                name: p.name.clone(),
                role: p.role.clone(),
                expected_amount: p.expected_amount(),
            })
            .collect()
    } else {
        Vec::new()
    };

    Report {
        project: project.clone(),
        report_type: filter.report_type(),
        title: report_title(filter, professional.as_ref()),
        period: filter.period(),
        professional,
        remaining_balance: remaining_balance(project.budget, total_spent),
        cost_per_area: cost_per_area(total_spent, project.area),
        total_spent,
        expenses: filtered,
        distribution,
        professionals: professional_lines,
        generated_at,
    }
}
