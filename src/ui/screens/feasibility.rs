use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::money::format_amount;
use crate::ui::app::{App, FeasibilityCheck};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(check) = &app.feasibility else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(6)])
        .split(area);

    render_inputs(f, chunks[0], check);
    render_result(f, chunks[1], check);
}

fn block(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title.into(),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn labelled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<20}"), theme::dim_style()),
        Span::styled(value, theme::normal_style()),
    ])
}

fn render_inputs(f: &mut Frame, area: Rect, check: &FeasibilityCheck) {
    let input = &check.input;
    let snapshot = &check.snapshot;
    let lines = vec![
        labelled("Planned expense", input.expense_name().to_string()),
        labelled(
            "Amount",
            format!(
                "{} within {} months",
                format_amount(input.amount()),
                input.timeframe_months()
            ),
        ),
        labelled("Monthly income", format_amount(snapshot.monthly_income)),
        labelled("Monthly expenses", format_amount(snapshot.monthly_expenses)),
        labelled("Current savings", format_amount(snapshot.current_savings)),
        labelled("Monthly savings", format_amount(snapshot.monthly_savings())),
    ];
    f.render_widget(Paragraph::new(lines).block(block(format!(" Plan ({}) ", check.source))), area);
}

fn render_result(f: &mut Frame, area: Rect, check: &FeasibilityCheck) {
    let result = &check.result;
    let color = theme::signed_color(result.feasible);

    let mut lines = vec![
        Line::from(Span::styled(
            result.message.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        result
            .details
            .iter()
            .map(|d| Line::from(Span::styled(format!("  • {d}"), theme::normal_style()))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        result.recommendation.as_str(),
        Style::default().fg(theme::YELLOW),
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block(" Result "));
    f.render_widget(paragraph, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Check whether you can afford a planned expense",
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            ":check <name> <amount> <months>   uses your income, savings and this month's expenses",
            theme::dim_style(),
        )),
        Line::from(Span::styled(
            ":check --sample <name> <amount> <months>   uses demo figures",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(block(" Feasibility "));
    f.render_widget(msg, area);
}
