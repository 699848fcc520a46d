use std::collections::BTreeMap;

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::screens;
use super::theme;
use crate::money::format_amount;
use rust_decimal::Decimal;

/// Normal-mode keys, in the order the help overlay lists them.
const KEYS: &[(&str, &str)] = &[
    ("1-5 / Tab", "Switch screen"),
    ("j k / arrows", "Move selection"),
    ("g G", "First / last row"),
    ("Ctrl-d Ctrl-u", "Half page down / up"),
    ("H L", "Previous / next month"),
    ("D", "Delete selected expense or budget"),
    ("/", "Search this month's expenses"),
    (":", "Command prompt"),
    ("Esc", "Clear search and status"),
    ("Ctrl-q", "Quit"),
];

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [tabs, body, status, prompt] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_tabs(f, tabs, app);
    match app.screen {
        Screen::Dashboard => screens::dashboard::render(f, body, app),
        Screen::Expenses => screens::expenses::render(f, body, app),
        Screen::Budgets => screens::budgets::render(f, body, app),
        Screen::Insights => screens::insights::render(f, body, app),
        Screen::Feasibility => screens::feasibility::render(f, body, app),
    }
    render_status(f, status, app);
    render_prompt(f, prompt, app);

    if app.show_help {
        render_help(f, f.area());
    }
}

/// Screen title with a short marker for what needs attention there.
fn tab_title(app: &App, index: usize, screen: Screen) -> String {
    let badge = match screen {
        Screen::Budgets => match app.tier_counts() {
            (0, _) => String::new(),
            (danger, _) => format!(" !{danger}"),
        },
        Screen::Insights if !app.tips.is_empty() => format!(" ({})", app.tips.len()),
        Screen::Feasibility => match &app.feasibility {
            Some(check) if check.result.feasible => " ok".to_string(),
            Some(_) => " short".to_string(),
            None => String::new(),
        },
        _ => String::new(),
    };
    format!("{} {screen}{badge}", index + 1)
}

fn render_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, screen)| tab_title(app, i, *screen))
        .collect();
    let selected = Screen::all()
        .iter()
        .position(|s| *s == app.screen)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::TEXT_DIM).bg(theme::HEADER_BG))
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("|", Style::default().fg(theme::OVERLAY)));
    f.render_widget(tabs, area);
}

fn mode_color(mode: InputMode) -> Color {
    match mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
        InputMode::Search => theme::YELLOW,
        InputMode::Confirm => theme::RED,
    }
}

/// Budget health summary: danger and warning counts, or an all-clear.
fn budget_health(app: &App) -> Vec<Span<'static>> {
    if app.budgets.is_empty() {
        return vec![Span::styled(" no budgets ", theme::status_bar_style())];
    }
    let tier = |color| theme::status_bar_style().fg(color);
    match app.tier_counts() {
        (0, 0) => vec![Span::styled(" all budgets on track ", tier(theme::GREEN))],
        (danger, warning) => {
            let mut spans = Vec::new();
            if danger > 0 {
                spans.push(Span::styled(format!(" {danger} danger "), tier(theme::RED)));
            }
            if warning > 0 {
                spans.push(Span::styled(
                    format!(" {warning} warning "),
                    tier(theme::YELLOW),
                ));
            }
            spans
        }
    }
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let mut left = vec![
        Span::styled(
            format!(" {} ", app.input_mode),
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(mode_color(app.input_mode))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", app.current_month), theme::header_style()),
    ];
    left.extend(budget_health(app));
    if let (Screen::Feasibility, Some(check)) = (app.screen, &app.feasibility) {
        left.push(Span::styled(
            format!("| {} ", check.source),
            theme::status_bar_style(),
        ));
    }

    let savings = app.snapshot.monthly_savings();
    let right = Line::from(vec![
        Span::styled("saved/month ", theme::status_bar_style()),
        Span::styled(
            format_amount(savings),
            theme::status_bar_style().fg(theme::signed_color(savings >= Decimal::ZERO)),
        ),
        Span::styled("  ? help ", theme::status_bar_style()),
    ]);

    let [left_area, right_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(right.width() as u16),
    ])
    .areas(area);
    f.render_widget(
        Paragraph::new(Line::from(left)).style(theme::status_bar_style()),
        left_area,
    );
    f.render_widget(
        Paragraph::new(right).style(theme::status_bar_style()),
        right_area,
    );
}

/// Idle hint for the prompt line when there is no status message.
fn screen_hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Dashboard => " :add <amount> <category> <description> records an expense",
        Screen::Expenses => " / searches, D deletes the selected expense",
        Screen::Budgets => " :budget <category> <limit> sets a limit, :spent adjusts it",
        Screen::Insights => " :income and :savings feed the savings tips",
        Screen::Feasibility => " :check [--sample] <name> <amount> <months>",
    }
}

/// The prompt line and, while typing, the cursor column.
fn prompt_line(app: &App) -> (Line<'_>, Option<u16>) {
    let typed = |sigil: &'static str, color: Color, text: &str| {
        let width = Line::from(text).width() as u16;
        (
            vec![
                Span::styled(sigil, Style::default().fg(color)),
                Span::styled(text.to_string(), theme::command_bar_style()),
            ],
            Some(1 + width),
        )
    };

    match app.input_mode {
        InputMode::Command => {
            let (spans, cursor) = typed(":", theme::ACCENT, &app.command_input);
            (Line::from(spans), cursor)
        }
        InputMode::Search => {
            let (mut spans, cursor) = typed("/", theme::YELLOW, &app.search_input);
            if !app.search_input.is_empty() {
                spans.push(Span::styled(
                    format!("  {} in {}", app.expenses.len(), app.current_month),
                    theme::dim_style(),
                ));
            }
            (Line::from(spans), cursor)
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(
                    app.confirm_message.as_str(),
                    Style::default().fg(theme::YELLOW),
                ),
                Span::styled(" [y/N]", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal if app.status_message.is_empty() => (
            Line::from(Span::styled(screen_hint(app.screen), theme::dim_style())),
            None,
        ),
        InputMode::Normal => (
            Line::from(Span::styled(
                app.status_message.as_str(),
                theme::command_bar_style(),
            )),
            None,
        ),
    }
}

fn render_prompt(f: &mut Frame, area: Rect, app: &App) {
    let (line, cursor) = prompt_line(app);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::COMMAND_BG)),
        area,
    );
    if let Some(column) = cursor {
        f.set_cursor_position((area.x + column, area.y));
    }
}

/// Registered commands with their aliases folded into one row, e.g. `:budgets, :b`.
fn command_rows() -> Vec<(String, &'static str)> {
    let mut by_description: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for (name, command) in commands::COMMANDS.iter() {
        by_description
            .entry(command.description)
            .or_default()
            .push(*name);
    }
    let mut rows: Vec<(String, &'static str)> = by_description
        .into_iter()
        .map(|(description, mut names)| {
            names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            let names: Vec<String> = names.iter().map(|n| format!(":{n}")).collect();
            (names.join(", "), description)
        })
        .collect();
    rows.sort();
    rows
}

fn render_help(f: &mut Frame, area: Rect) {
    let heading = |text: &'static str| {
        Row::new(vec![Cell::from(Span::styled(
            text,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))])
    };
    let entry = |keys: String, description: &'static str| {
        Row::new(vec![
            Cell::from(Span::styled(keys, Style::default().fg(theme::ACCENT))),
            Cell::from(Span::styled(description, theme::normal_style())),
        ])
    };

    let mut rows = vec![heading("Keys")];
    rows.extend(KEYS.iter().map(|(keys, what)| entry(keys.to_string(), what)));
    rows.push(Row::new(vec![Cell::from("")]));
    rows.push(heading("Commands"));
    rows.extend(command_rows().into_iter().map(|(names, what)| entry(names, what)));

    let height = (rows.len() as u16 + 2).min(area.height);
    let width = 84.min(area.width);
    let [popup] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(popup);

    let table = Table::new(rows, [Constraint::Length(26), Constraint::Min(20)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(" pocketplan keys and commands ")
            .title_bottom(" any key closes ")
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(table, popup);
}
