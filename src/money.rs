use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::PlanError;

/// Round to cents, half away from zero.
pub(crate) fn cents(val: Decimal) -> Decimal {
    val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Plain currency text with exactly 2 decimal places, e.g. `$1750.00`.
pub(crate) fn format_money(val: Decimal) -> String {
    let rounded = cents(val);
    if rounded < Decimal::ZERO {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${rounded:.2}")
    }
}

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let rounded = cents(val);
    let formatted = format!("{:.2}", rounded.abs());
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if rounded < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Sum of `amounts`, pinned at the bounds of `Decimal` instead of overflowing.
pub(crate) fn total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Parse user-entered money text, tolerating `$` and thousand separators.
pub(crate) fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal, PlanError> {
    let cleaned = raw.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return Err(PlanError::invalid(field, "value is required"));
    }
    Decimal::from_str(&cleaned)
        .map_err(|_| PlanError::invalid(field, format!("'{}' is not a number", raw.trim())))
}

/// Like [`parse_amount`], rejecting values below zero.
pub(crate) fn parse_non_negative(field: &'static str, raw: &str) -> Result<Decimal, PlanError> {
    let val = parse_amount(field, raw)?;
    if val < Decimal::ZERO {
        return Err(PlanError::invalid(field, "must not be negative"));
    }
    Ok(val)
}
