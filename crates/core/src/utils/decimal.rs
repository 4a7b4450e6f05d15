//! Overflow-safe arithmetic for amounts read from storage.
//!
//! Stored amounts are only bounded below, so sums and products clamp at the
//! `Decimal` range instead of panicking.

use rust_decimal::Decimal;

/// Sum of `values`, clamped at `Decimal::MAX` / `Decimal::MIN`.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(value))
}

/// `numerator / denominator`, clamped when the quotient leaves the `Decimal` range.
/// Returns zero for a zero denominator.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .unwrap_or_else(|| bound_for(numerator.is_sign_negative() != denominator.is_sign_negative()))
}

/// `part * 100 / denominator`, falling back to `part / denominator * 100` when
/// the scaled numerator overflows.
pub fn saturating_percentage(part: Decimal, denominator: Decimal, hundred: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_mul(hundred) {
        Some(scaled) => saturating_div(scaled, denominator),
        None => saturating_div(part, denominator).saturating_mul(hundred),
    }
}

fn bound_for(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}
