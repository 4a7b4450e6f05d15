use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::alerts::alerts_model::{Alert, AlertEvaluation, AlertKind};
use crate::professionals::ProfessionalBalance;
use crate::projects::Project;
use crate::summary::budget_used_percent;
use crate::utils::format::{format_currency_brl, format_percent};
use crate::utils::time_utils::days_between;

/// Checks one alert against the project's current figures on `today`.
///
/// Inactive alerts are reported but never trigger.
pub fn evaluate_alert(
    alert: &Alert,
    project: &Project,
    total_spent: Decimal,
    balances: &[ProfessionalBalance],
    today: NaiveDate,
) -> AlertEvaluation {
    let (triggered, message) = match &alert.kind {
        AlertKind::Budget { threshold_percent } => match project.effective_budget() {
            Some(budget) => {
                let used = budget_used_percent(Some(budget), total_spent);
                (
                    used >= *threshold_percent,
                    format!(
                        "{} of the budget used (alert at {})",
                        format_percent(used),
                        format_percent(*threshold_percent)
                    ),
                )
            }
            None => (false, "Project has no budget".to_string()),
        },
        AlertKind::Deadline { days_before } => match project.schedule_status(today) {
            Some(status) if status.overdue => (
                true,
                format!("Project is {} days past its end date", status.days),
            ),
            Some(status) => (
                status.days <= *days_before,
                format!("{} days until the project end date", status.days),
            ),
            None => (false, "Project has no end date".to_string()),
        },
        AlertKind::Payment {
            professional_id,
            due_date,
            days_before,
        } => match balances
            .iter()
            .find(|balance| &balance.professional_id == professional_id)
        {
            Some(balance) => {
                let days_until_due = days_between(today, *due_date);
                let owed = balance.balance_due > Decimal::ZERO;
                let message = if days_until_due < 0 {
                    format!(
                        "Payment to {} was due {} days ago, {} still owed",
                        balance.name,
                        -days_until_due,
                        format_currency_brl(balance.balance_due)
                    )
                } else {
                    format!(
                        "Payment to {} due in {} days, {} still owed",
                        balance.name,
                        days_until_due,
                        format_currency_brl(balance.balance_due)
                    )
                };
                (owed && days_until_due <= *days_before, message)
            }
            None => (
                false,
                format!("Professional {} not found on project", professional_id),
            ),
        },
    };

    AlertEvaluation {
        alert_id: alert.id.clone(),
        project_id: alert.project_id.clone(),
        kind: alert.kind.clone(),
        triggered: triggered && alert.active,
        message,
    }
}
