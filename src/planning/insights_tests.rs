#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Budget;

fn budget(category: &str, limit: Decimal, spent: Decimal) -> Budget {
    Budget {
        id: None,
        category: category.into(),
        limit_amount: limit,
        spent,
    }
}

#[test]
fn test_tips_order_danger_then_warning_then_savings() {
    let summary = aggregate(&[
        budget("Food", dec!(500), dec!(345)),
        budget("Transportation", dec!(300), dec!(220)),
        budget("Entertainment", dec!(200), dec!(185)),
    ]);
    let tips = spending_tips(&summary, &FinancialSnapshot::illustrative());

    assert_eq!(tips.len(), 3);
    assert_eq!(tips[0].category.as_deref(), Some("Entertainment"));
    assert_eq!(tips[0].severity, StatusTier::Danger);
    assert_eq!(tips[1].category.as_deref(), Some("Transportation"));
    assert_eq!(tips[1].severity, StatusTier::Warning);
    assert!(tips[2].category.is_none());
}

#[test]
fn test_tip_reports_amount_left() {
    let summary = aggregate(&[budget("Entertainment", dec!(200), dec!(185))]);
    let tips = spending_tips(&summary, &FinancialSnapshot::illustrative());
    assert_eq!(
        tips[0].message,
        "Entertainment has used 92% of its limit; $15.00 left."
    );
}

#[test]
fn test_tip_reports_overage() {
    let summary = aggregate(&[budget("Shopping", dec!(400), dec!(460))]);
    let tips = spending_tips(&summary, &FinancialSnapshot::illustrative());
    assert!(tips[0].message.contains("over budget by $60.00"));
}

#[test]
fn test_savings_tip_healthy_rate() {
    let tips = spending_tips(&BudgetSummary::default(), &FinancialSnapshot::illustrative());
    assert_eq!(tips.len(), 1);
    assert_eq!(tips[0].severity, StatusTier::Ok);
    assert!(tips[0].message.starts_with("You save 35% of your income ($1750.00/month)"));
}

#[test]
fn test_savings_tip_low_rate() {
    let snap = FinancialSnapshot::new(dec!(4000), dec!(3800), Decimal::ZERO);
    let tips = spending_tips(&BudgetSummary::default(), &snap);
    assert_eq!(tips[0].severity, StatusTier::Warning);
    assert!(tips[0].message.contains("Aim for 20%"));
}

#[test]
fn test_savings_tip_overspending() {
    let snap = FinancialSnapshot::new(dec!(3000), dec!(3500), Decimal::ZERO);
    let tips = spending_tips(&BudgetSummary::default(), &snap);
    assert_eq!(tips[0].severity, StatusTier::Danger);
    assert!(tips[0].message.contains("$500.00 more than you earn"));
}

#[test]
fn test_savings_tip_without_income() {
    let tips = spending_tips(&BudgetSummary::default(), &FinancialSnapshot::default());
    assert_eq!(tips[0].severity, StatusTier::Warning);
    assert!(tips[0].message.starts_with("Set your monthly income"));
}
