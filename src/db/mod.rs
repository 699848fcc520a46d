mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;
use crate::money;
use crate::planning::FinancialSnapshot;

pub(crate) struct Database {
    conn: Connection,
}

fn parse_decimal(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap_or_default()
}

/// Escape LIKE wildcards so user text matches literally under `ESCAPE '\'`.
fn like_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn row_to_expense(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    let amount: String = row.get(1)?;
    Ok(Expense {
        id: Some(row.get(0)?),
        amount: parse_decimal(&amount),
        category: row.get(2)?,
        description: row.get(3)?,
        date: row.get(4)?,
    })
}

/// Add `delta` to the spent total of the budget matching `category`, if any.
fn adjust_spent(conn: &Connection, category: &str, delta: Decimal) -> Result<()> {
    let current: Option<(i64, String)> = conn
        .query_row(
            "SELECT id, spent FROM budgets WHERE category = ?1",
            params![category],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    if let Some((id, spent)) = current {
        let updated = parse_decimal(&spent).saturating_add(delta);
        conn.execute(
            "UPDATE budgets SET spent = ?1 WHERE id = ?2",
            params![updated.to_string(), id],
        )?;
        tracing::debug!(%category, %delta, spent = %updated, "budget spent adjusted");
    }
    Ok(())
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.ensure_profile()?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        db.ensure_profile()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(version = schema::CURRENT_VERSION, "schema created");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(from = current, to = schema::CURRENT_VERSION, "schema migrated");
        }

        Ok(())
    }

    fn ensure_profile(&mut self) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO profile (id, monthly_income, current_savings, updated_at)
             VALUES (1, '0', '0', ?1)",
            params![now()],
        )?;
        Ok(())
    }

    // ── Profile ───────────────────────────────────────────────

    pub(crate) fn get_profile(&self) -> Result<Profile> {
        let (income, savings): (String, String) = self.conn.query_row(
            "SELECT monthly_income, current_savings FROM profile WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(Profile {
            monthly_income: parse_decimal(&income),
            current_savings: parse_decimal(&savings),
        })
    }

    pub(crate) fn set_monthly_income(&self, income: Decimal) -> Result<()> {
        self.conn.execute(
            "UPDATE profile SET monthly_income = ?1, updated_at = ?2 WHERE id = 1",
            params![income.to_string(), now()],
        )?;
        Ok(())
    }

    pub(crate) fn set_current_savings(&self, savings: Decimal) -> Result<()> {
        self.conn.execute(
            "UPDATE profile SET current_savings = ?1, updated_at = ?2 WHERE id = 1",
            params![savings.to_string(), now()],
        )?;
        Ok(())
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn get_budgets(&self) -> Result<Vec<Budget>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, category, limit_amount, spent FROM budgets ORDER BY category")?;
        let rows = stmt.query_map([], |row| {
            let limit: String = row.get(2)?;
            let spent: String = row.get(3)?;
            Ok(Budget {
                id: Some(row.get(0)?),
                category: row.get(1)?,
                limit_amount: parse_decimal(&limit),
                spent: parse_decimal(&spent),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Insert a budget, or update the limit of the existing budget for that
    /// category. Spent is left alone on update.
    pub(crate) fn upsert_budget(&self, budget: &Budget) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO budgets (category, limit_amount, spent, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(category) DO UPDATE SET limit_amount = ?2",
            params![
                budget.category,
                budget.limit_amount.to_string(),
                budget.spent.to_string(),
                now(),
            ],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM budgets WHERE category = ?1",
            params![budget.category],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    pub(crate) fn set_budget_spent(&self, id: i64, spent: Decimal) -> Result<()> {
        self.conn.execute(
            "UPDATE budgets SET spent = ?1 WHERE id = ?2",
            params![spent.to_string(), id],
        )?;
        Ok(())
    }

    pub(crate) fn delete_budget(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM budgets WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    /// Record an expense and add it to the matching budget's spent total.
    pub(crate) fn insert_expense(&mut self, expense: &Expense) -> Result<i64> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO expenses (amount, category, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expense.amount.to_string(),
                expense.category,
                expense.description,
                expense.date,
                now(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        adjust_spent(&tx, &expense.category, expense.amount)?;
        tx.commit()?;
        Ok(id)
    }

    pub(crate) fn insert_expenses_batch(&mut self, expenses: &[Expense]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO expenses (amount, category, description, date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            let created_at = now();
            for expense in expenses {
                stmt.execute(params![
                    expense.amount.to_string(),
                    expense.category,
                    expense.description,
                    expense.date,
                    created_at,
                ])?;
            }
        }
        for expense in expenses {
            adjust_spent(&tx, &expense.category, expense.amount)?;
        }
        tx.commit()?;
        Ok(expenses.len())
    }

    pub(crate) fn get_expenses(
        &self,
        month: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Expense>> {
        let mut sql =
            String::from("SELECT id, amount, category, description, date FROM expenses WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(m) = month {
            param_values.push(Box::new(format!("{m}%")));
            sql.push_str(&format!(" AND date LIKE ?{}", param_values.len()));
        }
        if let Some(q) = search.filter(|q| !q.is_empty()) {
            param_values.push(Box::new(format!("%{}%", like_escape(q))));
            let n = param_values.len();
            sql.push_str(&format!(
                " AND (description LIKE ?{n} ESCAPE '\\' OR category LIKE ?{n} ESCAPE '\\')"
            ));
        }
        sql.push_str(" ORDER BY date DESC, id DESC");

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_ref.as_slice(), row_to_expense)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_expense_by_id(&self, id: i64) -> Result<Option<Expense>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, amount, category, description, date FROM expenses WHERE id = ?1",
                params![id],
                row_to_expense,
            )
            .optional()?)
    }

    pub(crate) fn get_expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    /// Delete an expense and take it back out of the matching budget's spent total.
    pub(crate) fn delete_expense(&mut self, id: i64) -> Result<()> {
        let Some(expense) = self.get_expense_by_id(id)? else {
            return Ok(());
        };
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        adjust_spent(&tx, &expense.category, -expense.amount)?;
        tx.commit()?;
        Ok(())
    }

    // ── Analytics ─────────────────────────────────────────────

    pub(crate) fn get_expense_total(&self, month: Option<&str>) -> Result<Decimal> {
        Ok(money::total(
            self.get_expenses(month, None)?.iter().map(|e| e.amount),
        ))
    }

    /// Expense totals per month, oldest first, limited to the latest `months`.
    pub(crate) fn get_monthly_trend(&self, months: usize) -> Result<Vec<(String, Decimal)>> {
        let mut by_month: BTreeMap<String, Decimal> = BTreeMap::new();
        for expense in self.get_expenses(None, None)? {
            let entry = by_month
                .entry(expense.month().to_string())
                .or_insert(Decimal::ZERO);
            *entry = entry.saturating_add(expense.amount);
        }
        let skip = by_month.len().saturating_sub(months);
        Ok(by_month.into_iter().skip(skip).collect())
    }

    /// Projection inputs from recorded data: profile income and savings, plus
    /// the expense total of `month` (all time when `None`).
    pub(crate) fn financial_snapshot(&self, month: Option<&str>) -> Result<FinancialSnapshot> {
        let profile = self.get_profile()?;
        Ok(FinancialSnapshot::new(
            profile.monthly_income,
            self.get_expense_total(month)?,
            profile.current_savings,
        ))
    }

    // ── Export ────────────────────────────────────────────────

    /// Write expenses as `date,description,amount,category`. Returns the row count.
    pub(crate) fn export_expenses_csv(&self, path: &Path, month: Option<&str>) -> Result<usize> {
        let expenses = self.get_expenses(month, None)?;
        if expenses.is_empty() {
            return Ok(0);
        }
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        wtr.write_record(["date", "description", "amount", "category"])?;
        for e in &expenses {
            let amount = e.amount.to_string();
            wtr.write_record([
                e.date.as_str(),
                e.description.as_str(),
                amount.as_str(),
                e.category.as_str(),
            ])?;
        }
        wtr.flush()?;
        tracing::info!(count = expenses.len(), path = %path.display(), "expenses exported");
        Ok(expenses.len())
    }
}
