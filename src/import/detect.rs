/// Where each expense field lives in a CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnLayout {
    pub(crate) date: usize,
    pub(crate) description: usize,
    pub(crate) amount: usize,
    pub(crate) category: Option<usize>,
    pub(crate) has_header: bool,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            date: 0,
            description: 1,
            amount: 2,
            category: None,
            has_header: false,
        }
    }
}

const DATE_NAMES: &[&str] = &["date", "transaction date", "posted date", "posting date"];
const DESCRIPTION_NAMES: &[&str] = &["description", "memo", "payee", "name", "details"];
const AMOUNT_NAMES: &[&str] = &["amount", "debit", "value", "cost"];
const CATEGORY_NAMES: &[&str] = &["category", "type"];

/// Work out the column layout from the first row. A row is treated as a
/// header when it names at least the date and amount columns; otherwise the
/// default `date, description, amount[, category]` order is assumed.
pub(crate) fn detect_layout(first_row: &[String]) -> ColumnLayout {
    let h: Vec<String> = first_row
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    match (col_index(&h, DATE_NAMES), col_index(&h, AMOUNT_NAMES)) {
        (Some(date), Some(amount)) => ColumnLayout {
            date,
            description: col_index(&h, DESCRIPTION_NAMES).unwrap_or(1),
            amount,
            category: col_index(&h, CATEGORY_NAMES),
            has_header: true,
        },
        _ => ColumnLayout {
            category: (first_row.len() > 3).then_some(3),
            ..ColumnLayout::default()
        },
    }
}

fn col_index(headers: &[String], names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h.as_str()))
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
