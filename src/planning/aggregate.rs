use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Budget, Expense};
use crate::money::total;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Utilisation band of a single budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusTier {
    Ok,
    Warning,
    Danger,
}

impl StatusTier {
    /// Lower bounds are inclusive: 70 is a warning, 90 is danger.
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= Decimal::from(90) {
            Self::Danger
        } else if percentage >= Decimal::from(70) {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl std::fmt::Display for StatusTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    pub budget: Budget,
    pub percentage: Decimal,
    pub remaining: Decimal,
    pub status: StatusTier,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetTotals {
    pub total_limit: Decimal,
    pub total_spent: Decimal,
    pub total_remaining: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetSummary {
    pub lines: Vec<BudgetLine>,
    pub totals: BudgetTotals,
}

/// Share of `limit` consumed by `spent`, as a percentage.
/// A zero or negative limit yields zero instead of dividing.
pub fn percentage_used(spent: Decimal, limit: Decimal) -> Decimal {
    if limit <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    spent
        .checked_div(limit)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Per-budget utilisation plus portfolio totals. Input order is preserved.
pub fn aggregate(budgets: &[Budget]) -> BudgetSummary {
    let lines: Vec<BudgetLine> = budgets
        .iter()
        .map(|budget| {
            let percentage = percentage_used(budget.spent, budget.limit_amount);
            BudgetLine {
                budget: budget.clone(),
                percentage,
                remaining: budget.limit_amount.saturating_sub(budget.spent),
                status: StatusTier::from_percentage(percentage),
            }
        })
        .collect();

    let total_limit = total(budgets.iter().map(|b| b.limit_amount));
    let total_spent = total(budgets.iter().map(|b| b.spent));

    BudgetSummary {
        lines,
        totals: BudgetTotals {
            total_limit,
            total_spent,
            total_remaining: total_limit.saturating_sub(total_spent),
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub total: Decimal,
    /// Percentage of all spending in the input.
    pub share: Decimal,
}

/// Group expenses by category, largest first (ties by name).
pub fn spending_breakdown(expenses: &[Expense]) -> Vec<CategorySpend> {
    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for expense in expenses {
        let entry = by_category
            .entry(expense.category.as_str())
            .or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(expense.amount);
    }

    let grand_total = total(by_category.values().copied());

    let mut out: Vec<CategorySpend> = by_category
        .into_iter()
        .map(|(category, total)| CategorySpend {
            category: category.to_string(),
            total,
            share: percentage_used(total, grand_total),
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    out
}
