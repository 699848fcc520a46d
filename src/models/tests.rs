#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::PlanError;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_new_starts_unspent() {
    let budget = Budget::new("Food".into(), dec!(500));
    assert!(budget.id.is_none());
    assert_eq!(budget.category, "Food");
    assert_eq!(budget.limit_amount, dec!(500));
    assert_eq!(budget.spent, Decimal::ZERO);
}

#[test]
fn test_budget_parse_canonicalises_category() {
    let budget = Budget::parse("  food ", "$1,200").unwrap();
    assert_eq!(budget.category, "Food");
    assert_eq!(budget.limit_amount, dec!(1200));
}

#[test]
fn test_budget_parse_keeps_custom_category() {
    let budget = Budget::parse("Pet Supplies", "80").unwrap();
    assert_eq!(budget.category, "Pet Supplies");
}

#[test]
fn test_budget_parse_zero_limit_allowed() {
    let budget = Budget::parse("Other", "0").unwrap();
    assert_eq!(budget.limit_amount, Decimal::ZERO);
}

#[test]
fn test_budget_parse_rejects_bad_input() {
    assert!(matches!(
        Budget::parse("", "100"),
        Err(PlanError::InvalidInput { field: "category", .. })
    ));
    assert!(matches!(
        Budget::parse("Food", "lots"),
        Err(PlanError::InvalidInput { field: "limit", .. })
    ));
    assert!(matches!(
        Budget::parse("Food", "-5"),
        Err(PlanError::InvalidInput { field: "limit", .. })
    ));
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_expense_new_formats_date() {
    let expense = Expense::new(dec!(45.50), "Food".into(), "Groceries".into(), day(2025, 1, 10));
    assert_eq!(expense.date, "2025-01-10");
    assert_eq!(expense.month(), "2025-01");
}

#[test]
fn test_expense_parse() {
    let expense = Expense::parse("120", "transportation", " Gas ", day(2025, 1, 9)).unwrap();
    assert_eq!(expense.amount, dec!(120));
    assert_eq!(expense.category, "Transportation");
    assert_eq!(expense.description, "Gas");
}

#[test]
fn test_expense_parse_rejects_non_positive() {
    assert!(Expense::parse("0", "Food", "x", day(2025, 1, 1)).is_err());
    assert!(Expense::parse("-3", "Food", "x", day(2025, 1, 1)).is_err());
}

#[test]
fn test_expense_parse_requires_description() {
    let err = Expense::parse("3", "Food", "  ", day(2025, 1, 1)).unwrap_err();
    assert_eq!(
        err,
        PlanError::InvalidInput {
            field: "description",
            reason: "value is required".into()
        }
    );
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_canonical_category() {
    assert_eq!(category::canonical("HEALTHCARE"), "Healthcare");
    assert_eq!(category::canonical(" Rent "), "Rent");
}

#[test]
fn test_profile_default_is_zero() {
    let profile = Profile::default();
    assert_eq!(profile.monthly_income, Decimal::ZERO);
    assert_eq!(profile.current_savings, Decimal::ZERO);
}
