use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{Local, Months, NaiveDate};

use super::app::{App, InputMode, PendingAction, Screen, SnapshotSource};
use crate::db::Database;
use crate::import::ExpenseImporter;
use crate::models::{Budget, Expense};
use crate::money::{format_money, parse_non_negative};
use crate::planning::FeasibilityInput;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit pocketplan", cmd_quit, r);
    register_command!("quit", "Quit pocketplan", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("i", "Go to Insights", cmd_insights, r);
    register_command!("insights", "Go to Insights", cmd_insights, r);
    register_command!("f", "Go to Feasibility", cmd_feasibility, r);
    register_command!("feasibility", "Go to Feasibility", cmd_feasibility, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2025-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :month 2025-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add",
        "Record expense (e.g. :add 12.50 Food Team lunch)",
        cmd_add,
        r
    );
    register_command!(
        "delete-expense",
        "Delete selected expense",
        cmd_delete_expense,
        r
    );
    register_command!(
        "budget",
        "Set budget limit (e.g. :budget Food 500)",
        cmd_budget,
        r
    );
    register_command!(
        "spent",
        "Set amount spent on a budget (e.g. :spent Food 345)",
        cmd_spent,
        r
    );
    register_command!(
        "delete-budget",
        "Delete selected budget",
        cmd_delete_budget,
        r
    );
    register_command!(
        "income",
        "Set monthly income (e.g. :income 5000)",
        cmd_income,
        r
    );
    register_command!(
        "savings",
        "Set current savings (e.g. :savings 8500)",
        cmd_savings,
        r
    );
    register_command!(
        "check",
        "Check a planned expense (e.g. :check Laptop 1500 6, --sample for demo figures)",
        cmd_check,
        r
    );
    register_command!(
        "search",
        "Search expenses (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search expenses (e.g. :search coffee)", cmd_search, r);
    register_command!(
        "import",
        "Import expenses from CSV (e.g. :import ~/expenses.csv)",
        cmd_import,
        r
    );
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, "running command");
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `"<head...> <last>"` on the final space, e.g. a multi-word category and an amount.
fn split_last(args: &str) -> Option<(&str, &str)> {
    let (head, last) = args.rsplit_once(' ')?;
    let head = head.trim();
    (!head.is_empty()).then_some((head, last))
}

// ── Navigation ───────────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(db)
}

fn cmd_expenses(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh_expenses(db)
}

fn cmd_budgets(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh_budgets(db)
}

fn cmd_insights(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Insights;
    app.refresh_all(db)
}

fn cmd_feasibility(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Feasibility;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.current_month = Local::now().format("%Y-%m").to_string();
        app.set_status(format!("Month: {}", app.current_month));
        return app.refresh_all(db);
    }

    // Accept "2025-01", "2025-1", "01", "1"
    let month = if args.len() <= 2 {
        let year = app.current_month.get(..4).unwrap_or("1970");
        format!("{year}-{args:0>2}")
    } else if let Some((year, m)) = args.split_once('-') {
        format!("{year}-{m:0>2}")
    } else {
        args.to_string()
    };

    match NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d") {
        Ok(date) => {
            app.current_month = date.format("%Y-%m").to_string();
            app.set_status(format!("Switched to month: {}", app.current_month));
            app.refresh_all(db)?;
        }
        Err(_) => app.set_status("Invalid month format. Use YYYY-MM (e.g. 2025-01)"),
    }

    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    advance_month(app, db, 1)
}

fn cmd_prev_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    advance_month(app, db, -1)
}

fn advance_month(app: &mut App, db: &mut Database, delta: i32) -> anyhow::Result<()> {
    let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", app.current_month), "%Y-%m-%d")
    else {
        return Ok(());
    };
    let new_date = if delta > 0 {
        date.checked_add_months(Months::new(1))
    } else {
        date.checked_sub_months(Months::new(1))
    };

    if let Some(d) = new_date {
        app.current_month = d.format("%Y-%m").to_string();
        app.set_status(format!("Month: {}", app.current_month));
        app.expense_index = 0;
        app.expense_scroll = 0;
        app.refresh_all(db)?;
    }
    Ok(())
}

// ── Expenses ─────────────────────────────────────────────────

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let mut parts = args.splitn(3, ' ');
    let (Some(amount), Some(category), Some(description)) =
        (parts.next(), parts.next(), parts.next())
    else {
        app.set_status("Usage: :add <amount> <category> <description>");
        return Ok(());
    };

    let today = Local::now().date_naive();
    let expense = match Expense::parse(amount, category, description, today) {
        Ok(e) => e,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    db.insert_expense(&expense)?;
    app.refresh_all(db)?;
    app.set_status(format!(
        "Added {} for {} ({}) on {}",
        format_money(expense.amount),
        expense.description,
        expense.category,
        expense.date
    ));
    Ok(())
}

fn cmd_delete_expense(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some((id, description, amount)) = app
        .selected_expense()
        .and_then(|e| e.id.map(|id| (id, e.description.clone(), e.amount)))
    else {
        app.set_status("No expense selected");
        return Ok(());
    };
    app.confirm_message = format!("Delete '{description}' ({})?", format_money(amount));
    app.pending_action = Some(PendingAction::DeleteExpense { id, description });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Expenses;
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.refresh_expenses(db)?;
    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("{} matches for '{args}'", app.expenses.len()));
    }
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :import <file.csv>");
        return Ok(());
    }
    let path = crate::run::shellexpand(args);
    let report = match ExpenseImporter::read(Path::new(&path)) {
        Ok(r) => r,
        Err(e) => {
            app.set_status(format!("Import failed: {e:#}"));
            return Ok(());
        }
    };

    let count = db.insert_expenses_batch(&report.expenses)?;
    app.refresh_all(db)?;
    app.set_status(format!(
        "Imported {count} expenses ({} rows skipped)",
        report.skipped
    ));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/pocketplan-export-{}.csv", app.current_month)
    } else {
        crate::run::shellexpand(args)
    };

    let count = db.export_expenses_csv(Path::new(&path), Some(&app.current_month))?;
    if count == 0 {
        app.set_status("No expenses to export");
    } else {
        app.set_status(format!("Exported {count} expenses to {path}"));
    }
    Ok(())
}

// ── Budgets ──────────────────────────────────────────────────

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some((category, limit)) = split_last(args) else {
        app.set_status("Usage: :budget <category> <limit>. Example: :budget Food 500");
        return Ok(());
    };

    let budget = match Budget::parse(category, limit) {
        Ok(b) => b,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    db.upsert_budget(&budget)?;
    app.refresh_budgets(db)?;
    app.refresh_insights();
    app.screen = Screen::Budgets;
    app.set_status(format!(
        "Budget set: {} = {}",
        budget.category,
        format_money(budget.limit_amount)
    ));
    Ok(())
}

fn cmd_spent(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some((category, amount)) = split_last(args) else {
        app.set_status("Usage: :spent <category> <amount>");
        return Ok(());
    };
    let spent = match parse_non_negative("spent", amount) {
        Ok(v) => v,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let Some((id, name)) = app
        .budgets
        .iter()
        .find(|b| b.category.eq_ignore_ascii_case(category))
        .and_then(|b| b.id.map(|id| (id, b.category.clone())))
    else {
        app.set_status(format!("No budget for '{category}'"));
        return Ok(());
    };

    db.set_budget_spent(id, spent)?;
    app.refresh_budgets(db)?;
    app.refresh_insights();
    app.set_status(format!("{name}: spent set to {}", format_money(spent)));
    Ok(())
}

fn cmd_delete_budget(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some((id, name)) = app
        .selected_budget()
        .and_then(|b| b.id.map(|id| (id, b.category.clone())))
    else {
        app.set_status("No budgets to delete");
        return Ok(());
    };
    app.confirm_message = format!("Delete budget for '{name}'?");
    app.pending_action = Some(PendingAction::DeleteBudget { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

// ── Profile & planning ───────────────────────────────────────

fn cmd_income(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match parse_non_negative("monthly income", args) {
        Ok(income) => {
            db.set_monthly_income(income)?;
            app.refresh_all(db)?;
            app.set_status(format!("Monthly income set to {}", format_money(income)));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_savings(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match parse_non_negative("current savings", args) {
        Ok(savings) => {
            db.set_current_savings(savings)?;
            app.refresh_all(db)?;
            app.set_status(format!("Current savings set to {}", format_money(savings)));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_check(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let (sample, args) = match args.strip_prefix("--sample") {
        Some(rest) => (true, rest.trim()),
        None => (false, args),
    };
    let parsed = split_last(args).and_then(|(head, months)| {
        split_last(head).map(|(name, amount)| (name, amount, months))
    });
    let Some((name, amount, months)) = parsed else {
        app.set_status("Usage: :check [--sample] <name> <amount> <months>");
        return Ok(());
    };

    let input = match FeasibilityInput::parse(name, amount, months) {
        Ok(i) => i,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let source = if sample {
        SnapshotSource::Sample
    } else {
        SnapshotSource::Recorded
    };
    let message = app.run_check(input, source).message.clone();
    app.screen = Screen::Feasibility;
    app.set_status(message);
    Ok(())
}
