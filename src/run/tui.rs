use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Database;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    let mut app = App::new();
    app.refresh_all(db)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab bar, status bar, command bar, block borders and table header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            let outcome = match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db),
                InputMode::Command => handle_command_input(key, app, db),
                InputMode::Search => handle_search_input(key, app, db),
                InputMode::Confirm => handle_confirm_input(key, app, db),
            };
            // command errors land in the status bar
            if let Err(e) = outcome {
                tracing::warn!(error = %e, "command failed");
                app.set_status(format!("Error: {e:#}"));
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') if ctrl => app.running = false,
        KeyCode::Char('d') if ctrl => move_cursor(app, Motion::HalfPageDown),
        KeyCode::Char('u') if ctrl => move_cursor(app, Motion::HalfPageUp),
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, Motion::Down),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, Motion::Up),
        KeyCode::Char('g') => move_cursor(app, Motion::Top),
        KeyCode::Char('G') => move_cursor(app, Motion::Bottom),
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if let Some(screen) = Screen::all().get(index) {
                switch_screen(app, db, *screen)?;
            }
        }
        KeyCode::Tab => cycle_screen(app, db, 1)?,
        KeyCode::BackTab => cycle_screen(app, db, -1)?,
        KeyCode::Char('H') => commands::handle_command("prev-month", app, db)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app, db)?,
        KeyCode::Char('D') => match app.screen {
            Screen::Expenses => commands::handle_command("delete-expense", app, db)?,
            Screen::Budgets => commands::handle_command("delete-budget", app, db)?,
            _ => {}
        },
        KeyCode::Esc => {
            app.status_message.clear();
            if !app.search_input.is_empty() {
                app.search_input.clear();
                app.refresh_expenses(db)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            app.refresh_expenses(db)?;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            live_search(app, db)?;
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            live_search(app, db)?;
        }
        _ => {}
    }
    Ok(())
}

fn live_search(app: &mut App, db: &Database) -> Result<()> {
    app.screen = Screen::Expenses;
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.refresh_expenses(db)
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    let action = app.pending_action.take();
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();

    let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
    match (confirmed, action) {
        (true, Some(PendingAction::DeleteExpense { id, description })) => {
            db.delete_expense(id)?;
            app.refresh_all(db)?;
            app.set_status(format!("Deleted: {description}"));
        }
        (true, Some(PendingAction::DeleteBudget { id, name })) => {
            db.delete_budget(id)?;
            app.refresh_budgets(db)?;
            app.refresh_insights();
            app.set_status(format!("Deleted budget: {name}"));
        }
        _ => app.set_status("Cancelled"),
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    match screen {
        Screen::Dashboard => app.refresh_dashboard(db)?,
        Screen::Expenses => app.refresh_expenses(db)?,
        Screen::Budgets => app.refresh_budgets(db)?,
        Screen::Insights => app.refresh_all(db)?,
        Screen::Feasibility => {}
    }
    Ok(())
}

fn cycle_screen(app: &mut App, db: &mut Database, step: isize) -> Result<()> {
    let screens = Screen::all();
    let current = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
    let next = (current as isize + step).rem_euclid(screens.len() as isize) as usize;
    switch_screen(app, db, screens[next])
}

#[derive(Clone, Copy)]
enum Motion {
    Down,
    Up,
    HalfPageDown,
    HalfPageUp,
    Top,
    Bottom,
}

/// Cursor, scroll offset and row count of the list on the current screen.
fn list_cursor(app: &mut App) -> Option<(&mut usize, &mut usize, usize)> {
    match app.screen {
        Screen::Expenses => Some((
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.len(),
        )),
        Screen::Budgets => Some((
            &mut app.budget_index,
            &mut app.budget_scroll,
            app.budgets.len(),
        )),
        _ => None,
    }
}

fn move_cursor(app: &mut App, motion: Motion) {
    let page = app.visible_rows.max(1);
    let Some((index, scroll, len)) = list_cursor(app) else {
        return;
    };
    match motion {
        Motion::Down => scroll_down(index, scroll, len, page),
        Motion::Up => scroll_up(index, scroll),
        Motion::HalfPageDown => {
            for _ in 0..page / 2 {
                scroll_down(index, scroll, len, page);
            }
        }
        Motion::HalfPageUp => {
            for _ in 0..page / 2 {
                scroll_up(index, scroll);
            }
        }
        Motion::Top => scroll_to_top(index, scroll),
        Motion::Bottom => scroll_to_bottom(index, scroll, len, page),
    }
}
