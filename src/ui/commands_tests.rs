#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::app::{App, InputMode, PendingAction, Screen, SnapshotSource};
use super::commands::handle_command;
use crate::db::Database;

fn setup() -> (App, Database) {
    let db = Database::open_in_memory().unwrap();
    let mut app = App::new();
    app.refresh_all(&db).unwrap();
    (app, db)
}

fn run(input: &str, app: &mut App, db: &mut Database) {
    handle_command(input, app, db).unwrap();
}

#[test]
fn test_unknown_command_suggests_closest() {
    let (mut app, mut db) = setup();
    run("budgte Food 10", &mut app, &mut db);
    assert_eq!(
        app.status_message,
        "Unknown command: :budgte. Did you mean :budget?"
    );
}

#[test]
fn test_screen_commands() {
    let (mut app, mut db) = setup();
    run("b", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Budgets);
    run("insights", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Insights);
    run("q", &mut app, &mut db);
    assert!(!app.running);
}

#[test]
fn test_budget_with_multi_word_category() {
    let (mut app, mut db) = setup();
    run("budget Eating Out 250", &mut app, &mut db);
    assert_eq!(app.budgets.len(), 1);
    assert_eq!(app.budgets[0].category, "Eating Out");
    assert_eq!(app.budgets[0].limit_amount, dec!(250));
    assert_eq!(app.screen, Screen::Budgets);
}

#[test]
fn test_budget_rejects_bad_limit() {
    let (mut app, mut db) = setup();
    run("budget Food lots", &mut app, &mut db);
    assert!(app.budgets.is_empty());
    assert!(app.status_message.starts_with("invalid limit"));
}

#[test]
fn test_spent_updates_tier() {
    let (mut app, mut db) = setup();
    run("budget Food 500", &mut app, &mut db);
    run("spent food 460", &mut app, &mut db);
    assert_eq!(app.summary.lines[0].percentage, dec!(92));
    assert_eq!(app.tips[0].category.as_deref(), Some("Food"));
}

#[test]
fn test_add_expense_counts_toward_budget() {
    let (mut app, mut db) = setup();
    run("budget Food 100", &mut app, &mut db);
    run("add 12.50 food Team lunch", &mut app, &mut db);
    assert_eq!(app.expenses.len(), 1);
    assert_eq!(app.expenses[0].description, "Team lunch");
    assert_eq!(app.expenses[0].category, "Food");
    assert_eq!(app.budgets[0].spent, dec!(12.50));
}

#[test]
fn test_add_rejects_non_positive() {
    let (mut app, mut db) = setup();
    run("add 0 Food Nothing", &mut app, &mut db);
    assert!(app.expenses.is_empty());
    assert_eq!(app.status_message, "invalid amount: must be greater than zero");
}

#[test]
fn test_delete_expense_asks_for_confirmation() {
    let (mut app, mut db) = setup();
    run("add 5 Food Coffee", &mut app, &mut db);
    run("delete-expense", &mut app, &mut db);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::DeleteExpense { ref description, .. }) if description == "Coffee"
    ));
}

#[test]
fn test_delete_budget_with_nothing_selected() {
    let (mut app, mut db) = setup();
    run("delete-budget", &mut app, &mut db);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "No budgets to delete");
}

#[test]
fn test_income_and_savings_feed_snapshot() {
    let (mut app, mut db) = setup();
    run("income 5000", &mut app, &mut db);
    run("savings 8500", &mut app, &mut db);
    assert_eq!(app.snapshot.monthly_income, dec!(5000));
    assert_eq!(app.snapshot.current_savings, dec!(8500));

    run("income -10", &mut app, &mut db);
    assert_eq!(app.snapshot.monthly_income, dec!(5000));
    assert!(app.status_message.contains("must not be negative"));
}

#[test]
fn test_check_with_sample_figures() {
    let (mut app, mut db) = setup();
    run("check --sample New Laptop 1500 6", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Feasibility);
    let check = app.feasibility.as_ref().unwrap();
    assert_eq!(check.input.expense_name(), "New Laptop");
    assert_eq!(check.source, SnapshotSource::Sample);
    assert!(check.result.feasible);
    assert_eq!(
        app.status_message,
        "Great news! This expense is feasible within 6 months."
    );
}

#[test]
fn test_check_uses_recorded_figures() {
    let (mut app, mut db) = setup();
    // no income, no savings: nothing can be saved
    run("check Car 20000 12", &mut app, &mut db);
    let check = app.feasibility.as_ref().unwrap();
    assert_eq!(check.source, SnapshotSource::Recorded);
    assert!(!check.result.feasible);
    assert_eq!(check.result.additional_months, None);
}

#[test]
fn test_check_rejects_zero_months() {
    let (mut app, mut db) = setup();
    run("check Trip 900 0", &mut app, &mut db);
    assert!(app.feasibility.is_none());
    assert!(app.status_message.starts_with("invalid timeframe"));
}

#[test]
fn test_month_navigation() {
    let (mut app, mut db) = setup();
    run("month 2025-1", &mut app, &mut db);
    assert_eq!(app.current_month, "2025-01");
    run("prev-month", &mut app, &mut db);
    assert_eq!(app.current_month, "2024-12");
    run("next-month", &mut app, &mut db);
    run("next-month", &mut app, &mut db);
    assert_eq!(app.current_month, "2025-02");
    run("m 13", &mut app, &mut db);
    assert_eq!(app.current_month, "2025-02");
    assert!(app.status_message.starts_with("Invalid month"));
}

#[test]
fn test_import_and_export() {
    let (mut app, mut db) = setup();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    std::fs::write(
        &input,
        "date,description,amount,category\n2025-01-10,Groceries,45.50,Food\n2025-01-11,Bus,2.75,\n",
    )
    .unwrap();

    run(&format!("import {}", input.display()), &mut app, &mut db);
    assert_eq!(app.status_message, "Imported 2 expenses (0 rows skipped)");

    run("month 2025-01", &mut app, &mut db);
    assert_eq!(app.expenses.len(), 2);

    let output = dir.path().join("out.csv");
    run(&format!("export {}", output.display()), &mut app, &mut db);
    assert!(output.exists());
}

#[test]
fn test_search_filters_expenses() {
    let (mut app, mut db) = setup();
    run("add 4 Food Coffee", &mut app, &mut db);
    run("add 30 Transportation Fuel", &mut app, &mut db);
    run("search coff", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Expenses);
    assert_eq!(app.expenses.len(), 1);
    run("search", &mut app, &mut db);
    assert_eq!(app.expenses.len(), 2);
}
