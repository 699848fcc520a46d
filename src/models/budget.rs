use rust_decimal::Decimal;

use crate::error::PlanError;
use crate::money::parse_non_negative;

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: Option<i64>,
    pub category: String,
    pub limit_amount: Decimal,
    /// Accumulated spend. May exceed `limit_amount`.
    pub spent: Decimal,
}

impl Budget {
    pub fn new(category: String, limit_amount: Decimal) -> Self {
        Self {
            id: None,
            category,
            limit_amount,
            spent: Decimal::ZERO,
        }
    }

    /// Build a budget from form text. The limit must be a non-negative number.
    pub fn parse(category: &str, limit: &str) -> Result<Self, PlanError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(PlanError::invalid("category", "value is required"));
        }
        let limit_amount = parse_non_negative("limit", limit)?;
        Ok(Self::new(super::category::canonical(category), limit_amount))
    }
}
