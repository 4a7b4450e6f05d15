//! Expense filtering for reports. The period filter always runs before the type filter.

use chrono::NaiveDate;

use crate::errors::Result;
use crate::expenses::{Expense, ExpenseCategory};
use crate::reports::reports_model::{ReportFilter, ReportRequest};

/// Inclusive on both ends. Undated expenses are never within a period.
pub fn is_within_period(expense: &Expense, start: NaiveDate, end: NaiveDate) -> bool {
    expense
        .date
        .map(|date| date >= start && date <= end)
        .unwrap_or(false)
}

/// Narrows to the requested period. Only `Period` filters narrow anything.
pub fn filter_by_period(expenses: Vec<Expense>, filter: &ReportFilter) -> Vec<Expense> {
    match filter {
        ReportFilter::Period { start, end } => expenses
            .into_iter()
            .filter(|expense| is_within_period(expense, *start, *end))
            .collect(),
        _ => expenses,
    }
}

pub fn filter_by_type(expenses: Vec<Expense>, filter: &ReportFilter) -> Vec<Expense> {
    match filter {
        ReportFilter::General | ReportFilter::Period { .. } => expenses,
        ReportFilter::Material => expenses
            .into_iter()
            .filter(|expense| expense.classification() != ExpenseCategory::Labor)
            .collect(),
        ReportFilter::LaborTotal => expenses.into_iter().filter(Expense::is_labor).collect(),
        ReportFilter::LaborByProfessional { professional_id } => expenses
            .into_iter()
            .filter(|expense| expense.is_payment_to(professional_id))
            .collect(),
    }
}

pub fn apply_report_filter(expenses: Vec<Expense>, filter: &ReportFilter) -> Vec<Expense> {
    filter_by_type(filter_by_period(expenses, filter), filter)
}

/// Validates the request, then filters. Nothing is filtered when validation fails.
pub fn filter_report_expenses(expenses: Vec<Expense>, request: &ReportRequest) -> Result<Vec<Expense>> {
    let filter = request.validate()?;
    Ok(apply_report_filter(expenses, &filter))
}

/// Oldest first, undated expenses last.
pub fn sort_by_date(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| match (a.date, b.date) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
