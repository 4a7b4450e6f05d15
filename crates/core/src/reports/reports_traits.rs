use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::reports::reports_model::{Report, ReportRequest};

/// Trait for report generation
pub trait ReportServiceTrait: Send + Sync {
    fn generate_report(&self, request: &ReportRequest) -> Result<Report>;
    fn generate_report_at(&self, request: &ReportRequest, generated_at: NaiveDateTime) -> Result<Report>;
}
