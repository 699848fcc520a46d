use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::Path;

use crate::config::{Config, Dirs};
use crate::db::Database;
use crate::import::ExpenseImporter;
use crate::models::category::DEFAULT_CATEGORIES;
use crate::models::{Budget, Expense, DATE_FORMAT};
use crate::money::{format_amount, format_money, parse_amount, parse_non_negative};
use crate::planning::{
    aggregate, project, spending_breakdown, spending_tips, BudgetSummary, FeasibilityInput,
    FinancialSnapshot,
};

/// Flags that take a value; their values are not positional arguments.
const VALUE_FLAGS: &[&str] = &["--date", "--month", "--income", "--expenses", "--savings"];

pub(crate) fn as_cli(args: &[String], db: &mut Database, dirs: &Dirs, config: &Config) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "summary" | "s" => cli_summary(rest, db),
        "budgets" => cli_budgets(db),
        "expenses" => cli_expenses(rest, db),
        "add" => cli_add(rest, db),
        "budget" => cli_budget(rest, db),
        "income" => cli_income(rest, db),
        "savings" => cli_savings(rest, db),
        "check" => cli_check(rest, db),
        "import" => cli_import(rest, db),
        "export" => cli_export(rest, db),
        "config" => cli_config(rest, dirs, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("pocketplan {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("pocketplan - local budget tracker and expense feasibility checker");
    println!();
    println!("Usage: pocketplan [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  summary [YYYY-MM]                       Monthly summary, budgets and tips");
    println!("  budgets                                 List budgets with utilisation");
    println!("  expenses [YYYY-MM]                      List expenses for a month");
    println!("  add <amount> <category> <description>   Record an expense");
    println!("    --date <YYYY-MM-DD>                   Expense date (default: today)");
    println!("  budget <category> <limit>               Create or update a budget");
    println!("  income <amount>                         Set monthly income");
    println!("  savings <amount>                        Set current savings");
    println!("  check <name> <amount> <months>          Check whether a planned expense is feasible");
    println!("    --sample                              Use demo figures instead of your records");
    println!("    --income/--expenses/--savings <X>     Override a single figure");
    println!("  import <file.csv>                       Import expenses from CSV");
    println!("  export [path]                           Export expenses to CSV");
    println!("    --month <YYYY-MM>                     Month to export (default: current)");
    println!("  config [--write]                        Show paths and settings, or write config.json");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
    println!();
    println!("Categories: {}", DEFAULT_CATEGORIES.join(", "));
}

// ── Argument helpers ─────────────────────────────────────────

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Arguments that are neither flags nor flag values.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

fn month_arg(args: &[String]) -> Result<String> {
    let Some(month) = positional(args).first().map(|m| m.to_string()) else {
        return Ok(current_month());
    };
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{month}', expected YYYY-MM"))?;
    Ok(month)
}

// ── Commands ─────────────────────────────────────────────────

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let month = month_arg(args)?;
    let snapshot = db.financial_snapshot(Some(&month))?;
    let summary = aggregate(&db.get_budgets()?);
    let breakdown = spending_breakdown(&db.get_expenses(Some(&month), None)?);

    println!("pocketplan - {month}");
    println!("{}", "─".repeat(40));
    println!("  Income:           {}", format_amount(snapshot.monthly_income));
    println!("  Expenses:         {}", format_amount(snapshot.monthly_expenses));
    println!("  Monthly savings:  {}", format_amount(snapshot.monthly_savings()));
    println!("  Current savings:  {}", format_amount(snapshot.current_savings));

    if !summary.lines.is_empty() {
        println!();
        println!("Budgets:");
        print_budget_lines(&summary);
    }

    if !breakdown.is_empty() {
        println!();
        println!("Spending by Category:");
        for c in &breakdown {
            println!("  {:<24} {:>12}  {:>5.1}%", c.category, format_amount(c.total), c.share);
        }
    }

    let tips = spending_tips(&summary, &snapshot);
    if !tips.is_empty() {
        println!();
        println!("Tips:");
        for tip in &tips {
            println!("  [{}] {}", tip.severity, tip.message);
        }
    }
    Ok(())
}

fn print_budget_lines(summary: &BudgetSummary) {
    for line in &summary.lines {
        println!(
            "  {:<20} {:>12} / {:>12}  {:>6.1}%  {}",
            line.budget.category,
            format_amount(line.budget.spent),
            format_amount(line.budget.limit_amount),
            line.percentage,
            line.status
        );
    }
    let t = &summary.totals;
    println!(
        "  {:<20} {:>12} / {:>12}  remaining {}",
        "Total",
        format_amount(t.total_spent),
        format_amount(t.total_limit),
        format_amount(t.total_remaining)
    );
}

fn cli_budgets(db: &mut Database) -> Result<()> {
    let summary = aggregate(&db.get_budgets()?);
    if summary.lines.is_empty() {
        println!("No budgets. Create one with: pocketplan budget <category> <limit>");
        return Ok(());
    }
    print_budget_lines(&summary);
    Ok(())
}

fn cli_expenses(args: &[String], db: &mut Database) -> Result<()> {
    let month = month_arg(args)?;
    let expenses = db.get_expenses(Some(&month), None)?;
    if expenses.is_empty() {
        println!("No expenses for {month}");
        return Ok(());
    }

    println!("{:<6} {:<12} {:<30} {:<16} {:>12}", "ID", "Date", "Description", "Category", "Amount");
    println!("{}", "─".repeat(80));
    for e in &expenses {
        println!(
            "{:<6} {:<12} {:<30} {:<16} {:>12}",
            e.id.unwrap_or(0),
            e.date,
            e.description,
            e.category,
            format_amount(e.amount)
        );
    }
    println!("{}", "─".repeat(80));
    let total = crate::money::total(expenses.iter().map(|e| e.amount));
    println!("{:>80}", format!("Total {}", format_amount(total)));
    Ok(())
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positional(args);
    if pos.len() < 3 {
        anyhow::bail!("Usage: pocketplan add <amount> <category> <description> [--date YYYY-MM-DD]");
    }
    let date = match flag_value(args, "--date") {
        Some(d) => NaiveDate::parse_from_str(d, DATE_FORMAT)
            .with_context(|| format!("Invalid date '{d}', expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };
    let description = pos[2..].join(" ");
    let expense = Expense::parse(pos[0], pos[1], &description, date)?;
    let id = db.insert_expense(&expense)?;
    println!(
        "Recorded #{id}: {} {} ({}) on {}",
        format_money(expense.amount),
        expense.description,
        expense.category,
        expense.date
    );
    Ok(())
}

fn cli_budget(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positional(args);
    let Some((limit, category)) = pos.split_last().filter(|(_, c)| !c.is_empty()) else {
        anyhow::bail!("Usage: pocketplan budget <category> <limit>");
    };
    let budget = Budget::parse(&category.join(" "), limit)?;
    db.upsert_budget(&budget)?;
    println!(
        "Budget set: {} = {}",
        budget.category,
        format_money(budget.limit_amount)
    );
    Ok(())
}

fn cli_income(args: &[String], db: &mut Database) -> Result<()> {
    let raw = positional(args).first().copied().unwrap_or("");
    let income = parse_non_negative("monthly income", raw)?;
    db.set_monthly_income(income)?;
    println!("Monthly income set to {}", format_money(income));
    Ok(())
}

fn cli_savings(args: &[String], db: &mut Database) -> Result<()> {
    let raw = positional(args).first().copied().unwrap_or("");
    let savings = parse_non_negative("current savings", raw)?;
    db.set_current_savings(savings)?;
    println!("Current savings set to {}", format_money(savings));
    Ok(())
}

/// Snapshot for `check`: recorded figures (or the demo ones with `--sample`),
/// with any `--income/--expenses/--savings` override applied on top.
fn check_snapshot(args: &[String], db: &Database) -> Result<FinancialSnapshot> {
    let mut snapshot = if has_flag(args, "--sample") {
        FinancialSnapshot::illustrative()
    } else {
        db.financial_snapshot(Some(&current_month()))?
    };
    if let Some(v) = flag_value(args, "--income") {
        snapshot.monthly_income = parse_amount("monthly income", v)?;
    }
    if let Some(v) = flag_value(args, "--expenses") {
        snapshot.monthly_expenses = parse_amount("monthly expenses", v)?;
    }
    if let Some(v) = flag_value(args, "--savings") {
        snapshot.current_savings = parse_amount("current savings", v)?;
    }
    Ok(snapshot)
}

fn cli_check(args: &[String], db: &mut Database) -> Result<()> {
    let pos = positional(args);
    if pos.len() < 3 {
        anyhow::bail!(
            "Usage: pocketplan check <name> <amount> <months> [--sample] [--income X] [--expenses X] [--savings X]"
        );
    }
    let (name, rest) = pos.split_at(pos.len() - 2);
    let input = FeasibilityInput::parse(&name.join(" "), rest[0], rest[1])?;
    let snapshot = check_snapshot(args, db)?;
    let result = project(&input, &snapshot);

    println!("{}", result.message);
    println!();
    for detail in &result.details {
        println!("  • {detail}");
    }
    println!();
    println!("{}", result.recommendation);
    Ok(())
}

fn cli_import(args: &[String], db: &mut Database) -> Result<()> {
    let Some(file_path) = positional(args).first().map(|p| shellexpand(p)) else {
        anyhow::bail!("Usage: pocketplan import <file.csv>");
    };
    let path = Path::new(&file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let report = ExpenseImporter::read(path)?;
    println!("Parsed {} expenses", report.expenses.len());
    let count = db.insert_expenses_batch(&report.expenses)?;
    println!("Imported {count} expenses ({} rows skipped)", report.skipped);
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let month = flag_value(args, "--month")
        .map(str::to_string)
        .unwrap_or_else(current_month);

    let output_path = positional(args)
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/pocketplan-export-{month}.csv")
        });

    let count = db.export_expenses_csv(Path::new(&output_path), Some(&month))?;
    if count == 0 {
        println!("No expenses for {month}");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

fn cli_config(args: &[String], dirs: &Dirs, config: &Config) -> Result<()> {
    if has_flag(args, "--write") {
        config.save_to(&dirs.config_dir)?;
        println!("Wrote {}", dirs.config_dir.join("config.json").display());
        return Ok(());
    }
    println!("Config directory:  {}", dirs.config_dir.display());
    println!("Data directory:    {}", dirs.data_dir.display());
    println!("Database:          {}", config.resolve_db_path(&dirs.data_dir).display());
    println!("Log file:          {}", dirs.log_path().display());
    println!("Log filter:        {}", config.log_filter);
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_skips_flags_and_values() {
        let a = args(&["12.50", "Food", "--date", "2025-01-02", "Team", "lunch", "--sample"]);
        assert_eq!(positional(&a), vec!["12.50", "Food", "Team", "lunch"]);
        assert_eq!(flag_value(&a, "--date"), Some("2025-01-02"));
        assert!(has_flag(&a, "--sample"));
        assert_eq!(flag_value(&a, "--month"), None);
    }

    #[test]
    fn test_month_arg_validates() {
        assert_eq!(month_arg(&args(&["2025-03"])).unwrap(), "2025-03");
        assert!(month_arg(&args(&["March"])).is_err());
        assert_eq!(month_arg(&[]).unwrap(), current_month());
    }

    #[test]
    fn test_shellexpand_home() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        assert_eq!(shellexpand("~/x.csv"), format!("{home}/x.csv"));
        assert_eq!(shellexpand("/tmp/x.csv"), "/tmp/x.csv");
    }

    #[test]
    fn test_add_and_budget_commands() {
        let mut db = Database::open_in_memory().unwrap();
        cli_budget(&args(&["Eating", "Out", "200"]), &mut db).unwrap();
        cli_add(
            &args(&["18", "Eating Out", "Pizza", "night", "--date", "2025-01-05"]),
            &mut db,
        )
        .unwrap();

        let budgets = db.get_budgets().unwrap();
        assert_eq!(budgets[0].category, "Eating Out");
        assert_eq!(budgets[0].spent, dec!(18));
        let expenses = db.get_expenses(Some("2025-01"), None).unwrap();
        assert_eq!(expenses[0].description, "Pizza night");
    }

    #[test]
    fn test_income_rejects_negative() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(cli_income(&args(&["-5"]), &mut db).is_err());
        cli_income(&args(&["4200"]), &mut db).unwrap();
        assert_eq!(db.get_profile().unwrap().monthly_income, dec!(4200));
    }

    #[test]
    fn test_check_snapshot_overrides() {
        let db = Database::open_in_memory().unwrap();
        let snapshot = check_snapshot(&args(&["--sample", "--savings", "0"]), &db).unwrap();
        assert_eq!(snapshot.monthly_income, dec!(5000));
        assert_eq!(snapshot.current_savings, dec!(0));

        let recorded = check_snapshot(&args(&["--income", "3000"]), &db).unwrap();
        assert_eq!(recorded.monthly_income, dec!(3000));
        assert_eq!(recorded.monthly_expenses, dec!(0));
    }

    #[test]
    fn test_check_requires_three_arguments() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(cli_check(&args(&["Laptop", "1500"]), &mut db).is_err());
        assert!(cli_check(&args(&["Laptop", "1500", "0"]), &mut db).is_err());
        cli_check(&args(&["New", "Laptop", "1500", "6", "--sample"]), &mut db).unwrap();
    }
}
