//! Reports module - report requests, expense filtering and report assembly.

mod report_filter;
mod reports_errors;
mod reports_model;
mod reports_service;
mod reports_traits;

pub use report_filter::{
    apply_report_filter, filter_by_period, filter_by_type, filter_report_expenses,
    is_within_period, sort_by_date,
};
pub use reports_errors::ReportError;
pub use reports_model::{
    build_report, Report, ReportFilter, ReportPeriod, ReportProfessionalLine, ReportRequest,
    ReportType,
};
pub use reports_service::ReportService;
pub use reports_traits::ReportServiceTrait;
