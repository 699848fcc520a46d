#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::PlanError;

fn snapshot(income: Decimal, expenses: Decimal, savings: Decimal) -> FinancialSnapshot {
    FinancialSnapshot::new(income, expenses, savings)
}

// ── FeasibilityInput ──────────────────────────────────────────

#[test]
fn test_input_rejects_non_positive_amount() {
    assert!(matches!(
        FeasibilityInput::new("Car", Decimal::ZERO, 3),
        Err(PlanError::InvalidInput { field: "amount", .. })
    ));
    assert!(FeasibilityInput::new("Car", dec!(-1), 3).is_err());
}

#[test]
fn test_input_rejects_zero_timeframe() {
    assert!(matches!(
        FeasibilityInput::new("Car", dec!(100), 0),
        Err(PlanError::InvalidInput { field: "timeframe", .. })
    ));
}

#[test]
fn test_input_rejects_blank_name() {
    assert!(matches!(
        FeasibilityInput::new("   ", dec!(100), 2),
        Err(PlanError::InvalidInput { field: "expense name", .. })
    ));
}

#[test]
fn test_input_parse() {
    let input = FeasibilityInput::parse(" Vacation ", "$1,200", " 3 ").unwrap();
    assert_eq!(input.expense_name(), "Vacation");
    assert_eq!(input.amount(), dec!(1200));
    assert_eq!(input.timeframe_months(), 3);
}

#[test]
fn test_input_parse_rejects_non_numeric() {
    assert!(matches!(
        FeasibilityInput::parse("Car", "cheap", "3"),
        Err(PlanError::InvalidInput { field: "amount", .. })
    ));
    assert!(matches!(
        FeasibilityInput::parse("Car", "100", "2.5"),
        Err(PlanError::InvalidInput { field: "timeframe", .. })
    ));
    assert!(matches!(
        FeasibilityInput::parse("Car", "100", "-2"),
        Err(PlanError::InvalidInput { field: "timeframe", .. })
    ));
}

// ── Feasible ──────────────────────────────────────────────────

#[test]
fn test_feasible_scenario() {
    let input = FeasibilityInput::new("Laptop", dec!(1200), 3).unwrap();
    let result = project(&input, &FinancialSnapshot::illustrative());

    assert!(result.feasible);
    assert_eq!(result.monthly_savings, dec!(1750));
    assert_eq!(result.projected_total, dec!(13750));
    assert_eq!(result.shortfall, Decimal::ZERO);
    assert_eq!(result.additional_months, None);
    assert_eq!(result.tone, Some(Tone::Comfortable));
    assert_eq!(
        result.message,
        "Great news! This expense is feasible within 3 months."
    );
    assert_eq!(
        result.details,
        vec![
            "You can currently save $1750.00/month",
            "Your current savings: $8500.00",
            "Projected savings in 3 months: $13750.00",
            "Required amount: $1200.00",
        ]
    );
    assert_eq!(
        result.recommendation,
        "This expense fits well within your budget. You can proceed with confidence!"
    );
}

#[test]
fn test_income_share_scenario() {
    let input = FeasibilityInput::new("Laptop", dec!(1200), 3).unwrap();
    let share = percentage_of_monthly_income(&input, &FinancialSnapshot::illustrative());
    assert_eq!(share, Some(dec!(8)));
}

#[test]
fn test_feasible_exactly_at_projection() {
    let input = FeasibilityInput::new("Exact", dec!(13750), 3).unwrap();
    let result = project(&input, &FinancialSnapshot::illustrative());
    assert!(result.feasible);
}

#[test]
fn test_tone_significant_above_fifty_percent() {
    // 9000 / 3 = 3000 per month = 60% of 5000
    let input = FeasibilityInput::new("Ring", dec!(9000), 3).unwrap();
    let result = project(&input, &FinancialSnapshot::illustrative());
    assert!(result.feasible);
    assert_eq!(result.tone, Some(Tone::Significant));
    assert!(result.recommendation.starts_with("This is a significant expense."));
}

#[test]
fn test_tone_manageable_between_thirty_and_fifty() {
    // 6000 / 3 = 2000 per month = 40%
    let input = FeasibilityInput::new("Sofa", dec!(6000), 3).unwrap();
    let result = project(&input, &FinancialSnapshot::illustrative());
    assert_eq!(result.tone, Some(Tone::Manageable));
    assert!(result.recommendation.contains("automatic transfers"));
}

#[test]
fn test_tone_boundaries_are_exclusive() {
    // exactly 50% → manageable, exactly 30% → comfortable
    let fifty = FeasibilityInput::new("A", dec!(7500), 3).unwrap();
    let thirty = FeasibilityInput::new("B", dec!(4500), 3).unwrap();
    let snap = FinancialSnapshot::illustrative();
    assert_eq!(project(&fifty, &snap).tone, Some(Tone::Manageable));
    assert_eq!(project(&thirty, &snap).tone, Some(Tone::Comfortable));
}

#[test]
fn test_tone_without_income_is_significant() {
    let input = FeasibilityInput::new("Bike", dec!(300), 2).unwrap();
    let result = project(&input, &snapshot(Decimal::ZERO, Decimal::ZERO, dec!(1000)));
    assert!(result.feasible);
    assert_eq!(result.tone, Some(Tone::Significant));
}

// ── Infeasible ────────────────────────────────────────────────

#[test]
fn test_infeasible_scenario() {
    let input = FeasibilityInput::new("Car", dec!(20000), 4).unwrap();
    let result = project(&input, &FinancialSnapshot::illustrative());

    assert!(!result.feasible);
    assert_eq!(result.monthly_savings, dec!(1750));
    assert_eq!(result.projected_total, dec!(15500));
    assert_eq!(result.shortfall, dec!(4500));
    assert_eq!(result.additional_months, Some(3));
    assert_eq!(result.tone, None);
    assert_eq!(
        result.message,
        "This expense may be challenging within 4 months."
    );
    assert_eq!(
        result.details,
        vec![
            "Monthly savings capacity: $1750.00",
            "Projected savings in 4 months: $15500.00",
            "Shortfall: $4500.00",
            "You'd need 3 more months to save enough",
        ]
    );
    assert_eq!(
        result.recommendation,
        "Consider: 1) Extending to 7 months, 2) Reducing the expense by $4500.00, or 3) Finding ways to increase income by $1125.00/month."
    );
}

#[test]
fn test_negative_savings_is_not_computable() {
    let snap = snapshot(dec!(3000), dec!(3500), dec!(1000));
    let input = FeasibilityInput::new("Trip", dec!(2000), 6).unwrap();
    let result = project(&input, &snap);

    assert!(!result.feasible);
    assert_eq!(result.monthly_savings, dec!(-500));
    assert_eq!(result.projected_total, dec!(-2000));
    assert_eq!(result.shortfall, dec!(4000));
    assert_eq!(result.additional_months, None);
    assert!(result.message.contains("not achievable by saving alone"));
    assert_eq!(
        result.details[3],
        "Not achievable under current income and expense levels"
    );
    assert!(!result.recommendation.contains("Extending"));
    for line in result.details.iter().chain([&result.recommendation]) {
        assert!(!line.contains("NaN"));
        assert!(!line.contains("Infinity"));
    }
}

#[test]
fn test_zero_savings_is_not_computable() {
    let snap = snapshot(dec!(3000), dec!(3000), Decimal::ZERO);
    let input = FeasibilityInput::new("Trip", dec!(100), 1).unwrap();
    let result = project(&input, &snap);
    assert!(!result.feasible);
    assert_eq!(result.additional_months, None);
}

#[test]
fn test_negative_savings_covered_by_current_savings() {
    let snap = snapshot(dec!(3000), dec!(3500), dec!(10000));
    let input = FeasibilityInput::new("Phone", dec!(900), 2).unwrap();
    let result = project(&input, &snap);
    assert!(result.feasible);
    assert_eq!(result.projected_total, dec!(9000));
}

#[test]
fn test_additional_months_needed() {
    assert_eq!(additional_months_needed(dec!(4500), dec!(1750)), Some(3));
    assert_eq!(additional_months_needed(dec!(3500), dec!(1750)), Some(2));
    assert_eq!(additional_months_needed(dec!(0.01), dec!(1750)), Some(1));
    assert_eq!(additional_months_needed(dec!(100), Decimal::ZERO), None);
    assert_eq!(additional_months_needed(dec!(100), dec!(-5)), None);
}

// ── Purity ────────────────────────────────────────────────────

#[test]
fn test_project_is_idempotent() {
    let input = FeasibilityInput::new("Car", dec!(20000), 4).unwrap();
    let snap = FinancialSnapshot::illustrative();
    let first = project(&input, &snap);
    let second = project(&input, &snap);
    assert_eq!(first, second);
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
}

#[test]
fn test_huge_amounts_do_not_panic() {
    let input = FeasibilityInput::new("Moon", Decimal::MAX, u32::MAX).unwrap();
    let snap = snapshot(Decimal::MAX, Decimal::MIN, Decimal::MAX);
    let result = project(&input, &snap);
    assert!(result.feasible);
}
