//! Budget utilisation and savings-feasibility arithmetic.
//!
//! Everything here is a pure function over caller-owned data: no I/O, no
//! shared state, safe to call from anywhere.

mod aggregate;
mod feasibility;
mod insights;

pub use aggregate::{
    aggregate, percentage_used, spending_breakdown, BudgetLine, BudgetSummary, BudgetTotals,
    CategorySpend, StatusTier,
};
pub use feasibility::{
    additional_months_needed, percentage_of_monthly_income, project, FeasibilityInput,
    FeasibilityResult, FinancialSnapshot, Tone,
};
pub use insights::{spending_tips, Tip};


#[cfg(test)]
#[path = "feasibility_tests.rs"]
mod feasibility_tests;

#[cfg(test)]
#[path = "insights_tests.rs"]
mod insights_tests;
