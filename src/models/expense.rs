use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::PlanError;
use crate::money::parse_amount;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: Option<i64>,
    /// Positive outflow.
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    /// Format: "YYYY-MM-DD"
    pub date: String,
}

impl Expense {
    pub fn new(amount: Decimal, category: String, description: String, date: NaiveDate) -> Self {
        Self {
            id: None,
            amount,
            category,
            description,
            date: date.format(DATE_FORMAT).to_string(),
        }
    }

    /// Build an expense from form text, rejecting blank fields and non-positive amounts.
    pub fn parse(
        amount: &str,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> Result<Self, PlanError> {
        let amount = parse_amount("amount", amount)?;
        if amount <= Decimal::ZERO {
            return Err(PlanError::invalid("amount", "must be greater than zero"));
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(PlanError::invalid("category", "value is required"));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(PlanError::invalid("description", "value is required"));
        }
        Ok(Self::new(
            amount,
            super::category::canonical(category),
            description.to_string(),
            date,
        ))
    }

    /// "YYYY-MM" prefix of the expense date.
    pub fn month(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }
}
