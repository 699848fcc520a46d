/// Expense categories offered when adding an expense.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transportation",
    "Entertainment",
    "Healthcare",
    "Utilities",
    "Shopping",
    "Education",
    "Other",
];

/// Category used when an imported row has none.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Normalise a category label: known categories match case-insensitively and
/// take their canonical spelling, anything else is kept as typed (trimmed).
pub fn canonical(name: &str) -> String {
    let trimmed = name.trim();
    DEFAULT_CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(trimmed))
        .map(|c| c.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
