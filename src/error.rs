use thiserror::Error;

/// Errors raised by the planning core when its inputs violate their constraints.
///
/// Infeasible plans are not errors; they come back as a regular
/// [`crate::planning::FeasibilityResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl PlanError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
