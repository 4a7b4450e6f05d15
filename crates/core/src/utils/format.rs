use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, DISPLAY_PERCENT_PRECISION};

/// Rounds a percentage for display. Stored values keep full precision.
pub fn display_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_PERCENT_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Renders a percentage with one decimal place, e.g. `62.5%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.1}%", display_percent(value))
}

/// Renders an amount as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_currency_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let plain = format!("{:.2}", rounded.abs());
    let (integer_part, fraction_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (index, digit) in integer_part.chars().enumerate() {
        if index > 0 && (integer_part.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{}R$ {},{}", sign, grouped, fraction_part)
}
