use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::money::format_amount;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.summary.lines.is_empty() {
        render_empty(f, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = app
        .summary
        .lines
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(chunks[0].height.saturating_sub(2) as usize)
        .map(|(i, line)| {
            let color = theme::tier_color(line.status);
            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let remaining = if line.remaining < Decimal::ZERO {
                format!(" over by {}", format_amount(line.remaining.abs()))
            } else {
                format!(" {} left", format_amount(line.remaining))
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<18}", truncate(&line.budget.category, 17)), style),
                Span::styled(
                    format!(
                        "{}/{} ",
                        format_amount(line.budget.spent),
                        format_amount(line.budget.limit_amount)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(line.percentage, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:.0}%", line.percentage),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(remaining, theme::dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Budgets ({}) ", app.summary.lines.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, chunks[0]);

    render_totals(f, chunks[1], app);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let totals = &app.summary.totals;
    let line = Line::from(vec![
        Span::styled(" Limit ", theme::dim_style()),
        Span::styled(format_amount(totals.total_limit), theme::normal_style()),
        Span::styled("   Spent ", theme::dim_style()),
        Span::styled(format_amount(totals.total_spent), theme::expense_style()),
        Span::styled("   Remaining ", theme::dim_style()),
        Span::styled(
            format_amount(totals.total_remaining),
            Style::default()
                .fg(theme::signed_color(totals.total_remaining >= Decimal::ZERO))
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Totals ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No budgets yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :budget <category> <limit> to set a spending limit",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Budgets ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}
