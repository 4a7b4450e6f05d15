//! Alert domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// What an alert watches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertKind {
    /// Fires once this share of the budget has been spent.
    Budget {
        #[serde(rename = "thresholdPercent")]
        threshold_percent: Decimal,
    },
    /// Fires this many days before the project end date.
    Deadline {
        #[serde(rename = "daysBefore")]
        days_before: i64,
    },
    /// Fires ahead of a payment due to a professional who is still owed money.
    Payment {
        #[serde(rename = "professionalId")]
        professional_id: String,
        #[serde(rename = "dueDate")]
        due_date: NaiveDate,
        #[serde(rename = "daysBefore")]
        days_before: i64,
    },
}

impl AlertKind {
    pub fn validate(&self) -> Result<()> {
        match self {
            AlertKind::Budget { threshold_percent } => {
                if *threshold_percent <= Decimal::ZERO {
                    return Err(Error::invalid_input(format!(
                        "Budget alert threshold must be greater than zero, got {}",
                        threshold_percent
                    )));
                }
            }
            AlertKind::Deadline { days_before } => {
                if *days_before < 0 {
                    return Err(Error::invalid_input(
                        "Deadline alert days must not be negative",
                    ));
                }
            }
            AlertKind::Payment {
                professional_id,
                days_before,
                ..
            } => {
                if professional_id.trim().is_empty() {
                    return Err(Error::Validation(ValidationError::MissingField(
                        "professionalId".to_string(),
                    )));
                }
                if *days_before < 0 {
                    return Err(Error::invalid_input(
                        "Payment alert days must not be negative",
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn professional_id(&self) -> Option<&str> {
        match self {
            AlertKind::Payment {
                professional_id, ..
            } => Some(professional_id),
            _ => None,
        }
    }
}

/// Domain model representing an alert configured on a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub project_id: String,
    pub kind: AlertKind,
    pub active: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl Alert {
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "projectId".to_string(),
            )));
        }
        self.kind.validate()
    }
}

/// Input model for creating a new alert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    pub id: Option<String>,
    pub project_id: String,
    pub kind: AlertKind,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewAlert {
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "projectId".to_string(),
            )));
        }
        self.kind.validate()
    }

    pub fn into_alert(self, id: String, created_at: NaiveDateTime) -> Alert {
        Alert {
            id,
            project_id: self.project_id,
            kind: self.kind,
            active: self.active,
            created_at: Some(created_at),
        }
    }
}

/// Outcome of checking one alert on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvaluation {
    pub alert_id: String,
    pub project_id: String,
    pub kind: AlertKind,
    pub triggered: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_alert_kind_validation() {
        assert!(AlertKind::Budget {
            threshold_percent: dec!(80)
        }
        .validate()
        .is_ok());
        assert!(AlertKind::Budget {
            threshold_percent: dec!(0)
        }
        .validate()
        .is_err());
        assert!(AlertKind::Deadline { days_before: -1 }.validate().is_err());
        assert!(AlertKind::Payment {
            professional_id: "".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            days_before: 3,
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_new_alert_defaults_to_active() {
        let alert: NewAlert = serde_json::from_str(
            r#"{"projectId":"p1","kind":{"kind":"deadline","daysBefore":7}}"#,
        )
        .unwrap();
        assert!(alert.active);
        assert_eq!(alert.kind, AlertKind::Deadline { days_before: 7 });
    }
}
