use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;

use crate::db::Database;
use crate::models::{Budget, Expense};
use crate::planning::{
    aggregate, project, spending_breakdown, spending_tips, BudgetSummary, CategorySpend,
    FeasibilityInput, FeasibilityResult, FinancialSnapshot, StatusTier, Tip,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Budgets,
    Insights,
    Feasibility,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Expenses,
            Self::Budgets,
            Self::Insights,
            Self::Feasibility,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Insights => write!(f, "Insights"),
            Self::Feasibility => write!(f, "Feasibility"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, description: String },
    DeleteBudget { id: i64, name: String },
}

/// Where the figures behind a feasibility check came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SnapshotSource {
    Recorded,
    Sample,
}

impl std::fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recorded => write!(f, "recorded figures"),
            Self::Sample => write!(f, "sample figures"),
        }
    }
}

/// The last feasibility check and the figures it was run against.
#[derive(Debug, Clone)]
pub(crate) struct FeasibilityCheck {
    pub(crate) source: SnapshotSource,
    pub(crate) input: FeasibilityInput,
    pub(crate) snapshot: FinancialSnapshot,
    pub(crate) result: FeasibilityResult,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) current_month: String,

    // Dashboard
    pub(crate) snapshot: FinancialSnapshot,
    pub(crate) spending: Vec<CategorySpend>,
    pub(crate) monthly_trend: Vec<(String, Decimal)>,
    pub(crate) expense_count: i64,

    // Expenses
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Budgets
    pub(crate) budgets: Vec<Budget>,
    pub(crate) summary: BudgetSummary,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Insights
    pub(crate) tips: Vec<Tip>,

    // Feasibility
    pub(crate) feasibility: Option<FeasibilityCheck>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month: Local::now().format("%Y-%m").to_string(),

            snapshot: FinancialSnapshot::default(),
            spending: Vec::new(),
            monthly_trend: Vec::new(),
            expense_count: 0,

            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,

            budgets: Vec::new(),
            summary: BudgetSummary::default(),
            budget_index: 0,
            budget_scroll: 0,

            tips: Vec::new(),

            feasibility: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn refresh_dashboard(&mut self, db: &Database) -> Result<()> {
        self.snapshot = db.financial_snapshot(Some(&self.current_month))?;
        let month_expenses = db.get_expenses(Some(&self.current_month), None)?;
        self.spending = spending_breakdown(&month_expenses);
        self.monthly_trend = db.get_monthly_trend(12)?;
        self.expense_count = db.get_expense_count()?;
        Ok(())
    }

    pub(crate) fn refresh_expenses(&mut self, db: &Database) -> Result<()> {
        let search = if self.search_input.is_empty() {
            None
        } else {
            Some(self.search_input.as_str())
        };
        self.expenses = db.get_expenses(Some(&self.current_month), search)?;
        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
            self.expense_scroll = self.expense_scroll.min(self.expense_index);
        }
        Ok(())
    }

    pub(crate) fn refresh_budgets(&mut self, db: &Database) -> Result<()> {
        self.budgets = db.get_budgets()?;
        self.summary = aggregate(&self.budgets);
        if self.budget_index >= self.budgets.len() {
            self.budget_index = self.budgets.len().saturating_sub(1);
            self.budget_scroll = self.budget_scroll.min(self.budget_index);
        }
        Ok(())
    }

    /// Number of budgets in the danger and warning tiers.
    pub(crate) fn tier_counts(&self) -> (usize, usize) {
        let count = |tier| self.summary.lines.iter().filter(|l| l.status == tier).count();
        (count(StatusTier::Danger), count(StatusTier::Warning))
    }

    /// Tips are derived from the loaded budgets and snapshot, so refresh those first.
    pub(crate) fn refresh_insights(&mut self) {
        self.tips = spending_tips(&self.summary, &self.snapshot);
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.refresh_dashboard(db)?;
        self.refresh_expenses(db)?;
        self.refresh_budgets(db)?;
        self.refresh_insights();
        Ok(())
    }

    /// Run a feasibility check against `snapshot`, keeping it for display.
    pub(crate) fn run_check(
        &mut self,
        input: FeasibilityInput,
        source: SnapshotSource,
    ) -> &FeasibilityResult {
        let snapshot = match source {
            SnapshotSource::Recorded => self.snapshot.clone(),
            SnapshotSource::Sample => FinancialSnapshot::illustrative(),
        };
        let result = project(&input, &snapshot);
        &self
            .feasibility
            .insert(FeasibilityCheck {
                source,
                input,
                snapshot,
                result,
            })
            .result
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    pub(crate) fn selected_budget(&self) -> Option<&Budget> {
        self.budgets.get(self.budget_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
