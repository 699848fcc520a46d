use rust_decimal::Decimal;

use super::aggregate::{BudgetSummary, StatusTier};
use super::feasibility::FinancialSnapshot;
use crate::money::format_money;

/// A healthy savings rate, as a percentage of income.
const TARGET_SAVINGS_RATE: i64 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Tip {
    /// Budget category the tip is about, or `None` for whole-profile tips.
    pub category: Option<String>,
    pub message: String,
    pub severity: StatusTier,
}

/// Spending tips: danger budgets first, then warnings, then the savings rate.
pub fn spending_tips(summary: &BudgetSummary, snapshot: &FinancialSnapshot) -> Vec<Tip> {
    let mut tips = Vec::new();

    for tier in [StatusTier::Danger, StatusTier::Warning] {
        for line in summary.lines.iter().filter(|l| l.status == tier) {
            let category = &line.budget.category;
            let message = if line.remaining < Decimal::ZERO {
                format!(
                    "{category} is over budget by {}. Pause spending here or raise the limit.",
                    format_money(line.remaining.abs())
                )
            } else {
                format!(
                    "{category} has used {}% of its limit; {} left.",
                    line.percentage.round(),
                    format_money(line.remaining)
                )
            };
            tips.push(Tip {
                category: Some(category.clone()),
                message,
                severity: tier,
            });
        }
    }

    tips.push(savings_tip(snapshot));
    tips
}

fn savings_tip(snapshot: &FinancialSnapshot) -> Tip {
    let savings = snapshot.monthly_savings();

    if savings < Decimal::ZERO {
        return Tip {
            category: None,
            message: format!(
                "You spend {} more than you earn each month. Savings will shrink until expenses drop.",
                format_money(savings.abs())
            ),
            severity: StatusTier::Danger,
        };
    }

    if snapshot.monthly_income <= Decimal::ZERO {
        return Tip {
            category: None,
            message: "Set your monthly income to see how much you can save.".to_string(),
            severity: StatusTier::Warning,
        };
    }

    let rate = super::aggregate::percentage_used(savings, snapshot.monthly_income);
    if rate < Decimal::from(TARGET_SAVINGS_RATE) {
        Tip {
            category: None,
            message: format!(
                "You save {}% of your income ({}/month). Aim for {TARGET_SAVINGS_RATE}% by trimming warning categories.",
                rate.round(),
                format_money(savings)
            ),
            severity: StatusTier::Warning,
        }
    } else {
        Tip {
            category: None,
            message: format!(
                "You save {}% of your income ({}/month). Keep it up!",
                rate.round(),
                format_money(savings)
            ),
            severity: StatusTier::Ok,
        }
    }
}
