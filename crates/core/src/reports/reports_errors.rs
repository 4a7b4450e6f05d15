use thiserror::Error;

/// Missing parameters detected before a report is filtered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("A period report needs both a start date and an end date")]
    MissingDateRange,

    #[error("A per-professional labor report needs a professional id")]
    MissingProfessional,
}
