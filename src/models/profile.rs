use rust_decimal::Decimal;

/// The single user's income and savings position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub monthly_income: Decimal,
    pub current_savings: Decimal,
}
