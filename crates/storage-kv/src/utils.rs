//! Serde helpers for reading records written by earlier versions of the app.
//!
//! Legacy records are loosely typed: identifiers may be numbers, amounts may
//! be numeric strings (sometimes in `1.234,56` form) and blanks stand in for
//! missing values. These helpers accept all of those shapes.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use log::warn;
use obra_core::utils::time_utils::{now_utc, parse_calendar_date, parse_timestamp};
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Identifier stored as a string or a number.
pub fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("invalid record id: {}", other))),
    }
}

/// Optional reference stored as a string or a number. Blanks become `None`.
pub fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!("invalid reference: {}", other))),
    }
}

/// Optional amount stored as a number or a numeric string. Blanks become `None`.
pub fn de_opt_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => parse_decimal_text(&n.to_string())
            .map(Some)
            .map_err(de::Error::custom),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse_decimal_text(s.trim())
            .map(Some)
            .map_err(de::Error::custom),
        Some(other) => Err(de::Error::custom(format!("invalid amount: {}", other))),
    }
}

/// Parses `1234.56`, `1.234,56`, `1234,56` or scientific notation.
pub fn parse_decimal_text(text: &str) -> Result<Decimal, String> {
    let normalized = if text.contains(',') {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    };
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|e| format!("invalid amount '{}': {}", text, e))
}

/// First value that is present and not blank.
pub fn first_non_blank(candidates: [Option<String>; 2]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// Current time at the millisecond precision timestamps are stored with.
pub fn stored_now() -> NaiveDateTime {
    let now = now_utc();
    now.with_nanosecond(now.nanosecond() / 1_000_000 * 1_000_000)
        .unwrap_or(now)
}

/// Reads a stored calendar date. Unparseable values are dropped with a warning.
pub fn read_date(record_id: &str, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    let parsed = parse_calendar_date(value);
    if parsed.is_none() {
        warn!(
            "Ignoring unparseable {} '{}' on record {}",
            field, value, record_id
        );
    }
    parsed
}

pub fn read_timestamp(record_id: &str, field: &str, value: Option<&str>) -> Option<NaiveDateTime> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    let parsed = parse_timestamp(value);
    if parsed.is_none() {
        warn!(
            "Ignoring unparseable {} '{}' on record {}",
            field, value, record_id
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Deserialize)]
    struct LegacyRow {
        #[serde(deserialize_with = "de_id")]
        id: String,
        #[serde(default, deserialize_with = "de_opt_id")]
        reference: Option<String>,
        #[serde(default, deserialize_with = "de_opt_decimal")]
        amount: Option<Decimal>,
    }

    fn decode_row(json: &str) -> LegacyRow {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let p = decode_row(r#"{"id": 1712345678901, "reference": 42}"#);
        assert_eq!(p.id, "1712345678901");
        assert_eq!(p.reference.as_deref(), Some("42"));
    }

    #[test]
    fn test_blank_reference_is_none() {
        assert_eq!(decode_row(r#"{"id": "a", "reference": "  "}"#).reference, None);
        assert_eq!(decode_row(r#"{"id": "a", "reference": null}"#).reference, None);
        assert_eq!(decode_row(r#"{"id": "a"}"#).reference, None);
    }

    #[test]
    fn test_amount_shapes() {
        assert_eq!(decode_row(r#"{"id": "a", "amount": 150.5}"#).amount, Some(dec!(150.5)));
        assert_eq!(decode_row(r#"{"id": "a", "amount": "1.234,56"}"#).amount, Some(dec!(1234.56)));
        assert_eq!(decode_row(r#"{"id": "a", "amount": "99.90"}"#).amount, Some(dec!(99.90)));
        assert_eq!(decode_row(r#"{"id": "a", "amount": ""}"#).amount, None);
        assert_eq!(decode_row(r#"{"id": "a", "amount": 0.1}"#).amount, Some(dec!(0.1)));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(serde_json::from_str::<LegacyRow>(r#"{"id": ""}"#).is_err());
        assert!(serde_json::from_str::<LegacyRow>(r#"{"id": "a", "amount": "abc"}"#).is_err());
        assert!(serde_json::from_str::<LegacyRow>(r#"{"id": "a", "amount": [1]}"#).is_err());
    }

    #[test]
    fn test_read_date_drops_garbage() {
        assert_eq!(
            read_date("d1", "date", Some("2024-03-15")),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(read_date("d1", "date", Some("15 de março")), None);
        assert_eq!(read_date("d1", "date", Some("")), None);
        assert_eq!(read_date("d1", "date", None), None);
    }

    #[test]
    fn test_first_non_blank() {
        assert_eq!(
            first_non_blank([Some(" ".to_string()), Some("nota".to_string())]),
            Some("nota".to_string())
        );
        assert_eq!(first_non_blank([None, None]), None);
    }
}
