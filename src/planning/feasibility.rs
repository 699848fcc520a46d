use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::PlanError;
use crate::money::{format_money, parse_amount};

/// Income, expenses and savings used as projection inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialSnapshot {
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub current_savings: Decimal,
}

impl FinancialSnapshot {
    pub fn new(monthly_income: Decimal, monthly_expenses: Decimal, current_savings: Decimal) -> Self {
        Self {
            monthly_income,
            monthly_expenses,
            current_savings,
        }
    }

    /// Fixed sample figures for trying the checker without any recorded data.
    pub fn illustrative() -> Self {
        Self::new(Decimal::from(5000), Decimal::from(3250), Decimal::from(8500))
    }

    /// Income left after expenses each month. Zero or negative when nothing is saved.
    pub fn monthly_savings(&self) -> Decimal {
        self.monthly_income.saturating_sub(self.monthly_expenses)
    }
}

/// A planned expense. Only constructible with a positive amount and timeframe.
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityInput {
    expense_name: String,
    amount: Decimal,
    timeframe_months: u32,
}

impl FeasibilityInput {
    pub fn new(
        expense_name: &str,
        amount: Decimal,
        timeframe_months: u32,
    ) -> Result<Self, PlanError> {
        let expense_name = expense_name.trim();
        if expense_name.is_empty() {
            return Err(PlanError::invalid("expense name", "value is required"));
        }
        if amount <= Decimal::ZERO {
            return Err(PlanError::invalid("amount", "must be greater than zero"));
        }
        if timeframe_months == 0 {
            return Err(PlanError::invalid("timeframe", "must be at least one month"));
        }
        Ok(Self {
            expense_name: expense_name.to_string(),
            amount,
            timeframe_months,
        })
    }

    /// Validate raw form fields.
    pub fn parse(expense_name: &str, amount: &str, timeframe_months: &str) -> Result<Self, PlanError> {
        let amount = parse_amount("amount", amount)?;
        let raw_months = timeframe_months.trim();
        let months: u32 = raw_months.parse().map_err(|_| {
            PlanError::invalid(
                "timeframe",
                format!("'{raw_months}' is not a whole number of months"),
            )
        })?;
        Self::new(expense_name, amount, months)
    }

    pub fn expense_name(&self) -> &str {
        &self.expense_name
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timeframe_months(&self) -> u32 {
        self.timeframe_months
    }
}

/// How heavily a feasible expense leans on monthly income.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// More than 50% of monthly income per month.
    Significant,
    /// More than 30%, up to 50%.
    Manageable,
    Comfortable,
}

impl Tone {
    /// `None` means the income share is undefined (no positive income).
    fn from_income_share(share: Option<Decimal>) -> Self {
        match share {
            None => Self::Significant,
            Some(p) if p > Decimal::from(50) => Self::Significant,
            Some(p) if p > Decimal::from(30) => Self::Manageable,
            Some(_) => Self::Comfortable,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Significant => {
                "This is a significant expense. Consider extending the timeframe or finding additional income sources."
            }
            Self::Manageable => {
                "This is manageable but will require discipline. Consider setting up automatic transfers to a dedicated savings account."
            }
            Self::Comfortable => {
                "This expense fits well within your budget. You can proceed with confidence!"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityResult {
    pub feasible: bool,
    pub message: String,
    pub details: Vec<String>,
    pub recommendation: String,
    pub monthly_savings: Decimal,
    pub projected_total: Decimal,
    /// Zero when feasible.
    pub shortfall: Decimal,
    /// Extra months of saving needed. `None` when feasible, or when saving
    /// alone can never close the gap.
    pub additional_months: Option<u32>,
    /// Set only for feasible results.
    pub tone: Option<Tone>,
}

/// Monthly spend on the expense as a percentage of monthly income.
pub fn percentage_of_monthly_income(
    input: &FeasibilityInput,
    snapshot: &FinancialSnapshot,
) -> Option<Decimal> {
    if snapshot.monthly_income <= Decimal::ZERO {
        return None;
    }
    input
        .amount
        .checked_div(Decimal::from(input.timeframe_months))?
        .checked_div(snapshot.monthly_income)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Project savings over the timeframe and judge whether the expense is covered.
pub fn project(input: &FeasibilityInput, snapshot: &FinancialSnapshot) -> FeasibilityResult {
    let months = input.timeframe_months;
    let monthly_savings = snapshot.monthly_savings();
    let projected_total = snapshot
        .current_savings
        .saturating_add(monthly_savings.saturating_mul(Decimal::from(months)));

    if projected_total >= input.amount {
        let tone = Tone::from_income_share(percentage_of_monthly_income(input, snapshot));
        return FeasibilityResult {
            feasible: true,
            message: format!("Great news! This expense is feasible within {months} months."),
            details: vec![
                format!("You can currently save {}/month", format_money(monthly_savings)),
                format!(
                    "Your current savings: {}",
                    format_money(snapshot.current_savings)
                ),
                format!(
                    "Projected savings in {months} months: {}",
                    format_money(projected_total)
                ),
                format!("Required amount: {}", format_money(input.amount)),
            ],
            recommendation: tone.recommendation().to_string(),
            monthly_savings,
            projected_total,
            shortfall: Decimal::ZERO,
            additional_months: None,
            tone: Some(tone),
        };
    }

    let shortfall = input.amount.saturating_sub(projected_total);
    let income_gap = shortfall
        .checked_div(Decimal::from(months))
        .unwrap_or(shortfall);
    let additional_months = additional_months_needed(shortfall, monthly_savings);

    let common = [
        format!("Monthly savings capacity: {}", format_money(monthly_savings)),
        format!(
            "Projected savings in {months} months: {}",
            format_money(projected_total)
        ),
        format!("Shortfall: {}", format_money(shortfall)),
    ];

    let (message, last_detail, recommendation) = match additional_months {
        Some(extra) => (
            format!("This expense may be challenging within {months} months."),
            format!("You'd need {extra} more months to save enough"),
            format!(
                "Consider: 1) Extending to {} months, 2) Reducing the expense by {}, or 3) Finding ways to increase income by {}/month.",
                u64::from(months) + u64::from(extra),
                format_money(shortfall),
                format_money(income_gap),
            ),
        ),
        None => (
            format!("This expense is not achievable by saving alone within {months} months."),
            "Not achievable under current income and expense levels".to_string(),
            format!(
                "Consider: 1) Reducing the expense by {}, or 2) Finding ways to increase income by {}/month.",
                format_money(shortfall),
                format_money(income_gap),
            ),
        ),
    };

    let mut details: Vec<String> = common.into();
    details.push(last_detail);

    FeasibilityResult {
        feasible: false,
        message,
        details,
        recommendation,
        monthly_savings,
        projected_total,
        shortfall,
        additional_months,
        tone: None,
    }
}

/// Whole months of saving needed to cover `shortfall`, or `None` when nothing
/// is being saved (or the count does not fit in a `u32`).
pub fn additional_months_needed(shortfall: Decimal, monthly_savings: Decimal) -> Option<u32> {
    if monthly_savings <= Decimal::ZERO {
        return None;
    }
    if shortfall <= Decimal::ZERO {
        return Some(0);
    }
    shortfall.checked_div(monthly_savings)?.ceil().to_u32()
}
