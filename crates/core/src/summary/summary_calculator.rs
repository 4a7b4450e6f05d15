//! Pure aggregation functions over expense lists.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::expenses::{Expense, ExpenseCategory};
use crate::professionals::Professional;
use crate::projects::Project;
use crate::summary::summary_model::{CostDistribution, ExpenseTotals, FinancialSummary};
use crate::utils::decimal::{saturating_div, saturating_percentage, saturating_sum};

const ONE_HUNDRED: Decimal = dec!(100);

/// Places kept on a share of the total so that `100 - share` is exact.
const SHARE_SCALE: u32 = 26;

/// Totals clamp at `Decimal::MAX` instead of overflowing.
pub fn compute_totals(expenses: &[Expense]) -> ExpenseTotals {
    let mut total_spent = Decimal::ZERO;
    let mut labor_total = Decimal::ZERO;
    let mut material_total = Decimal::ZERO;

    for expense in expenses {
        total_spent = total_spent.saturating_add(expense.amount);
        match expense.classification() {
            ExpenseCategory::Labor => labor_total = labor_total.saturating_add(expense.amount),
            ExpenseCategory::Material => {
                material_total = material_total.saturating_add(expense.amount)
            }
            ExpenseCategory::Other => {}
        }
    }

    let material_other_total = total_spent.saturating_sub(labor_total);
    ExpenseTotals {
        total_spent,
        labor_total,
        material_total,
        other_total: material_other_total
            .saturating_sub(material_total)
            .max(Decimal::ZERO),
        material_other_total,
        expense_count: expenses.len(),
    }
}

/// Budget when it is set and positive, otherwise the total spent.
pub fn select_denominator(budget: Option<Decimal>, total_spent: Decimal) -> Decimal {
    match budget {
        Some(budget) if budget > Decimal::ZERO => budget,
        _ => total_spent,
    }
}

/// `part / denominator * 100`, or zero when the denominator is zero.
pub fn percentage_of(part: Decimal, denominator: Decimal) -> Decimal {
    saturating_percentage(part, denominator, ONE_HUNDRED)
}

pub fn compute_distribution(totals: &ExpenseTotals, budget: Option<Decimal>) -> CostDistribution {
    let denominator = select_denominator(budget, totals.total_spent);
    let (perc_labor, perc_material_other) =
        if !denominator.is_zero() && denominator == totals.total_spent {
            let perc_labor = percentage_of(totals.labor_total, denominator).round_dp(SHARE_SCALE);
            (perc_labor, ONE_HUNDRED - perc_labor)
        } else {
            (
                percentage_of(totals.labor_total, denominator),
                percentage_of(totals.material_other_total, denominator),
            )
        };
    CostDistribution {
        denominator,
        labor_total: totals.labor_total,
        material_other_total: totals.material_other_total,
        material_total: totals.material_total,
        other_total: totals.other_total,
        perc_labor,
        perc_material_other,
        perc_material: percentage_of(totals.material_total, denominator),
        perc_other: percentage_of(totals.other_total, denominator),
    }
}

/// `budget - total_spent`, only defined for a positive budget.
pub fn remaining_balance(budget: Option<Decimal>, total_spent: Decimal) -> Option<Decimal> {
    budget
        .filter(|budget| *budget > Decimal::ZERO)
        .map(|budget| budget.saturating_sub(total_spent))
}

/// Total spent per square meter, zero when either side is zero.
pub fn cost_per_area(total_spent: Decimal, area: Decimal) -> Decimal {
    if area <= Decimal::ZERO || total_spent.is_zero() {
        return Decimal::ZERO;
    }
    saturating_div(total_spent, area)
}

pub fn budget_used_percent(budget: Option<Decimal>, total_spent: Decimal) -> Decimal {
    match budget {
        Some(budget) if budget > Decimal::ZERO => percentage_of(total_spent, budget),
        _ => Decimal::ZERO,
    }
}

pub fn expected_labor_total(professionals: &[Professional]) -> Decimal {
    saturating_sum(professionals.iter().map(Professional::expected_amount))
}

/// Builds the dashboard summary of a project from its expenses and professionals.
pub fn summarize_project(
    project: &Project,
    expenses: &[Expense],
    professionals: &[Professional],
    today: NaiveDate,
) -> FinancialSummary {
    let totals = compute_totals(expenses);
    let distribution = compute_distribution(&totals, project.budget);

    FinancialSummary {
        project_id: project.id.clone(),
        budget: project.budget,
        area: project.area,
        remaining_balance: remaining_balance(project.budget, totals.total_spent),
        budget_used_percent: budget_used_percent(project.budget, totals.total_spent),
        cost_per_area: cost_per_area(totals.total_spent, project.area),
        expected_labor_total: expected_labor_total(professionals),
        schedule: project.schedule_status(today),
        totals,
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::CategoryTag;
    use crate::test_support::{sample_expense, sample_professional, sample_project};

    fn labor(id: &str, amount: Decimal) -> Expense {
        sample_expense(id, "p1", amount, CategoryTag::Labor)
    }

    fn material(id: &str, amount: Decimal) -> Expense {
        sample_expense(id, "p1", amount, CategoryTag::Material)
    }

    fn other(id: &str, amount: Decimal) -> Expense {
        sample_expense(id, "p1", amount, CategoryTag::Other("frete".to_string()))
    }

    #[test]
    fn test_totals_split_by_classification() {
        let expenses = vec![
            labor("e1", dec!(3000)),
            material("e2", dec!(1500)),
            other("e3", dec!(500)),
        ];
        let totals = compute_totals(&expenses);
        assert_eq!(totals.total_spent, dec!(5000));
        assert_eq!(totals.labor_total, dec!(3000));
        assert_eq!(totals.material_total, dec!(1500));
        assert_eq!(totals.other_total, dec!(500));
        assert_eq!(totals.material_other_total, dec!(2000));
        assert_eq!(totals.expense_count, 3);
    }

    #[test]
    fn test_professional_link_counts_as_labor() {
        let mut linked = material("e1", dec!(700));
        linked.professional_id = Some("pro-1".to_string());
        let totals = compute_totals(&[linked, material("e2", dec!(300))]);
        assert_eq!(totals.labor_total, dec!(700));
        assert_eq!(totals.material_total, dec!(300));
    }

    #[test]
    fn test_distribution_against_budget() {
        let totals = compute_totals(&[labor("e1", dec!(3000)), material("e2", dec!(2000))]);
        let distribution = compute_distribution(&totals, Some(dec!(10000)));
        assert_eq!(distribution.denominator, dec!(10000));
        assert_eq!(distribution.perc_labor, dec!(30));
        assert_eq!(distribution.perc_material_other, dec!(20));
    }

    #[test]
    fn test_distribution_without_budget_uses_total() {
        let totals = compute_totals(&[labor("e1", dec!(3000)), material("e2", dec!(2000))]);
        for budget in [None, Some(Decimal::ZERO), Some(dec!(-10))] {
            let distribution = compute_distribution(&totals, budget);
            assert_eq!(distribution.denominator, dec!(5000));
            assert_eq!(distribution.perc_labor, dec!(60));
            assert_eq!(distribution.perc_material_other, dec!(40));
            assert_eq!(
                distribution.perc_labor + distribution.perc_material_other,
                dec!(100)
            );
        }
    }

    #[test]
    fn test_shares_of_total_sum_to_exactly_hundred() {
        for (labor_amount, material_amount) in [
            (dec!(1), dec!(2)),
            (dec!(0.01), dec!(0.29)),
            (dec!(7), dec!(993)),
            (dec!(123456.78), dec!(0.03)),
        ] {
            let totals = compute_totals(&[labor("e1", labor_amount), material("e2", material_amount)]);
            let distribution = compute_distribution(&totals, None);
            assert_eq!(
                distribution.perc_labor + distribution.perc_material_other,
                dec!(100)
            );
        }
    }

    #[test]
    fn test_empty_project_is_all_zero() {
        let totals = compute_totals(&[]);
        let distribution = compute_distribution(&totals, None);
        assert_eq!(distribution.denominator, Decimal::ZERO);
        assert_eq!(distribution.perc_labor, Decimal::ZERO);
        assert_eq!(distribution.perc_material_other, Decimal::ZERO);
        assert_eq!(remaining_balance(None, totals.total_spent), None);
        assert_eq!(cost_per_area(totals.total_spent, dec!(100)), Decimal::ZERO);
    }

    #[test]
    fn test_remaining_balance_and_over_budget() {
        assert_eq!(remaining_balance(Some(dec!(1000)), dec!(400)), Some(dec!(600)));
        assert_eq!(remaining_balance(Some(dec!(1000)), dec!(1250)), Some(dec!(-250)));
        assert_eq!(remaining_balance(Some(Decimal::ZERO), dec!(50)), None);
        assert_eq!(remaining_balance(None, dec!(50)), None);
    }

    #[test]
    fn test_cost_per_area() {
        assert_eq!(cost_per_area(dec!(12000), dec!(80)), dec!(150));
        assert_eq!(cost_per_area(dec!(12000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_budget_used_percent() {
        assert_eq!(budget_used_percent(Some(dec!(2000)), dec!(500)), dec!(25));
        assert_eq!(budget_used_percent(None, dec!(500)), Decimal::ZERO);
    }

    #[test]
    fn test_summarize_project() {
        let mut project = sample_project("p1", "owner-1");
        project.budget = Some(dec!(20000));
        project.area = dec!(50);
        let mut pro = sample_professional("pro-1", "p1", "João");
        pro.expected_value = Some(dec!(8000));
        let expenses = vec![labor("e1", dec!(3000)), material("e2", dec!(2000))];
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let summary = summarize_project(&project, &expenses, &[pro], today);
        assert_eq!(summary.total_spent(), dec!(5000));
        assert_eq!(summary.remaining_balance, Some(dec!(15000)));
        assert_eq!(summary.budget_used_percent, dec!(25));
        assert_eq!(summary.cost_per_area, dec!(100));
        assert_eq!(summary.expected_labor_total, dec!(8000));
        assert_eq!(summary.distribution.perc_labor, dec!(15));
        assert!(!summary.is_over_budget());
    }

    #[test]
    fn test_totals_near_decimal_max_do_not_overflow() {
        let huge = Decimal::from_scientific("5e28").unwrap();
        let totals = compute_totals(&[labor("e1", huge), material("e2", huge)]);
        assert_eq!(totals.total_spent, Decimal::MAX);
        assert_eq!(totals.labor_total, huge);
        assert_eq!(totals.material_total, huge);
        assert!(totals.other_total >= Decimal::ZERO);

        let distribution = compute_distribution(&totals, None);
        assert!(distribution.perc_labor > dec!(0) && distribution.perc_labor < dec!(100));
        assert_eq!(cost_per_area(totals.total_spent, dec!(0.5)), Decimal::MAX);
        assert_eq!(remaining_balance(Some(dec!(-1)), totals.total_spent), None);
    }

    #[test]
    fn test_percentage_of_huge_part() {
        let part = Decimal::from_scientific("1e27").unwrap();
        assert_eq!(percentage_of(part, part), dec!(100));
        assert_eq!(percentage_of(part, dec!(0.001)), Decimal::MAX);
        assert_eq!(
            budget_used_percent(Some(dec!(1000)), part),
            Decimal::from_scientific("1e26").unwrap()
        );
    }

    #[test]
    fn test_summarize_project_with_huge_amount() {
        let mut project = sample_project("p1", "owner-1");
        project.budget = Some(dec!(20000));
        project.area = dec!(50);
        let expenses = vec![material("e1", Decimal::from_scientific("1e27").unwrap())];
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let summary = summarize_project(&project, &expenses, &[], today);
        assert!(summary.is_over_budget());
        let used = Decimal::from_scientific("5e24").unwrap();
        assert_eq!(summary.budget_used_percent, used);
        assert_eq!(summary.distribution.perc_material_other, used);
        assert_eq!(summary.cost_per_area, Decimal::from_scientific("2e25").unwrap());
    }
}
