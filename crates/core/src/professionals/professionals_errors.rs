use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a contract cannot be saved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("Unrecognized pricing model '{0}'")]
    UnrecognizedPricingModel(String),

    #[error("Agreed amount must be greater than zero, got {0}")]
    NonPositiveAgreedAmount(Decimal),

    #[error("Daily rate must be greater than zero, got {0}")]
    NonPositiveDailyRate(Decimal),

    #[error("Number of days must be greater than zero, got {0}")]
    NonPositiveDayCount(Decimal),

    #[error("Rate per square meter must be greater than zero, got {0}")]
    NonPositiveAreaRate(Decimal),

    #[error("Contracted area must be greater than zero, got {0}")]
    NonPositiveArea(Decimal),

    #[error("A staged contract needs at least one stage")]
    NoStages,

    #[error("Stage '{0}' must have a name and a value greater than zero")]
    InvalidStage(String),

    #[error("Contract end date {end} is before its start date {start}")]
    EndBeforeStart {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}
