use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::detect::{detect_layout, ColumnLayout};
use crate::models::category::{canonical, FALLBACK_CATEGORY};
use crate::models::Expense;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Expenses read from a file, plus how many rows were passed over.
#[derive(Debug, Default)]
pub(crate) struct ImportReport {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) skipped: usize,
}

pub(crate) struct ExpenseImporter;

impl ExpenseImporter {
    /// Read every expense row of a CSV file. Blank rows and rows with a zero
    /// amount are skipped; a malformed date or amount fails the whole import.
    pub(crate) fn read(path: &Path) -> Result<ImportReport> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        let Some(first) = rows.first() else {
            anyhow::bail!("CSV file is empty");
        };
        let layout = detect_layout(first);
        let body = if layout.has_header { &rows[1..] } else { &rows[..] };

        let mut report = ImportReport::default();
        for (i, row) in body.iter().enumerate() {
            let line = i + 1 + usize::from(layout.has_header);
            match parse_row(row, &layout).with_context(|| format!("Row {line}"))? {
                Some(expense) => report.expenses.push(expense),
                None => report.skipped += 1,
            }
        }

        tracing::debug!(
            path = %path.display(),
            rows = report.expenses.len(),
            skipped = report.skipped,
            "read expense csv"
        );
        Ok(report)
    }
}

fn field<'a>(row: &'a [String], col: usize) -> &'a str {
    row.get(col).map(|s| s.trim()).unwrap_or("")
}

fn parse_row(row: &[String], layout: &ColumnLayout) -> Result<Option<Expense>> {
    let date_str = field(row, layout.date);
    if date_str.is_empty() {
        return Ok(None);
    }
    let date = parse_date(date_str)?;

    let amount = parse_decimal(field(row, layout.amount))?.abs();
    if amount.is_zero() {
        return Ok(None);
    }

    let category = layout
        .category
        .map(|c| field(row, c))
        .filter(|c| !c.is_empty())
        .map(canonical)
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

    Ok(Some(Expense::new(
        amount,
        category,
        field(row, layout.description).to_string(),
        date,
    )))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .with_context(|| format!("Could not parse date '{s}'"))
}

fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ',', '"'], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).with_context(|| format!("Failed to parse '{s}' as an amount"))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
