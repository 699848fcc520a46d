mod budget;
pub(crate) mod category;
mod expense;
mod profile;

pub use budget::Budget;
pub use expense::Expense;
pub(crate) use expense::DATE_FORMAT;
pub use profile::Profile;

#[cfg(test)]
mod tests;
