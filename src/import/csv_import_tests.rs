#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ── parse_decimal ─────────────────────────────────────────────

#[test]
fn test_parse_decimal_with_currency() {
    assert_eq!(parse_decimal("$1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_decimal("-$99.99").unwrap(), dec!(-99.99));
}

#[test]
fn test_parse_decimal_parentheses_negative() {
    assert_eq!(parse_decimal("(500.00)").unwrap(), dec!(-500.00));
}

#[test]
fn test_parse_decimal_empty_is_zero() {
    assert_eq!(parse_decimal("  ").unwrap(), Decimal::ZERO);
}

#[test]
fn test_parse_decimal_invalid() {
    assert!(parse_decimal("twelve").is_err());
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    assert_eq!(parse_date("2025-01-15").unwrap(), expected);
    assert_eq!(parse_date("01/15/2025").unwrap(), expected);
    assert_eq!(parse_date("15.01.2025").unwrap(), expected);
}

#[test]
fn test_parse_date_rejects_garbage() {
    assert!(parse_date("yesterday").is_err());
    assert!(parse_date("2025-13-40").is_err());
}

// ── read ──────────────────────────────────────────────────────

#[test]
fn test_read_with_header_and_category() {
    let file = make_csv_file(
        "Date,Description,Amount,Category\n\
         2025-01-10,Groceries,45.50,food\n\
         2025-01-09,Gas,\"$1,120.00\",Transportation\n",
    );
    let report = ExpenseImporter::read(file.path()).unwrap();
    assert_eq!(report.skipped, 0);
    assert_eq!(report.expenses.len(), 2);

    let first = &report.expenses[0];
    assert_eq!(first.date, "2025-01-10");
    assert_eq!(first.description, "Groceries");
    assert_eq!(first.amount, dec!(45.50));
    assert_eq!(first.category, "Food");
    assert_eq!(report.expenses[1].amount, dec!(1120.00));
}

#[test]
fn test_read_headerless_defaults_to_other() {
    let file = make_csv_file("01/15/2025,Coffee,4.25\n15.01.2025,Bagel,3\n");
    let report = ExpenseImporter::read(file.path()).unwrap();
    assert_eq!(report.expenses.len(), 2);
    assert!(report.expenses.iter().all(|e| e.category == "Other"));
    assert_eq!(report.expenses[1].date, "2025-01-15");
}

#[test]
fn test_read_negative_amounts_become_positive() {
    let file = make_csv_file("date,memo,amount\n2025-02-01,Refund?,-12.30\n2025-02-02,Rent,(900)\n");
    let report = ExpenseImporter::read(file.path()).unwrap();
    assert_eq!(report.expenses[0].amount, dec!(12.30));
    assert_eq!(report.expenses[1].amount, dec!(900));
}

#[test]
fn test_read_skips_blank_and_zero_rows() {
    let file = make_csv_file(
        "date,description,amount\n\
         2025-03-01,Lunch,12\n\
         ,,\n\
         2025-03-02,Nothing,0.00\n",
    );
    let report = ExpenseImporter::read(file.path()).unwrap();
    assert_eq!(report.expenses.len(), 1);
    assert_eq!(report.skipped, 2);
}

#[test]
fn test_read_blank_category_falls_back() {
    let file = make_csv_file("date,description,amount,category\n2025-03-01,Misc,5,\n");
    let report = ExpenseImporter::read(file.path()).unwrap();
    assert_eq!(report.expenses[0].category, "Other");
}

#[test]
fn test_read_bad_date_reports_row() {
    let file = make_csv_file("date,description,amount\n2025-03-01,Ok,1\nsoon,Bad,2\n");
    let err = ExpenseImporter::read(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("Row 3"));
}

#[test]
fn test_read_empty_file() {
    let file = make_csv_file("");
    assert!(ExpenseImporter::read(file.path()).is_err());
}
