use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::money::format_amount;
use crate::planning::StatusTier;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_tips(f, chunks[0], app);
    render_breakdown(f, chunks[1], app);
}

fn titled_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_tips(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();
    for tip in &app.tips {
        let marker = match tip.severity {
            StatusTier::Danger => "!!",
            StatusTier::Warning => " !",
            StatusTier::Ok => " ✓",
        };
        let color = theme::tier_color(tip.severity);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{marker} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(tip.message.as_str(), theme::normal_style()),
        ]));
        lines.push(Line::from(""));
    }

    let tips = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(titled_block(" Spending Tips ".into()));
    f.render_widget(tips, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let block = titled_block(format!(" Where It Went, {} ", app.current_month));
    if app.spending.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses this month",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .spending
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<14}", truncate(&c.category, 13)), theme::normal_style()),
                Span::styled(
                    format!("{:>12} ", format_amount(c.total)),
                    theme::expense_style(),
                ),
                Span::styled(
                    progress_bar(c.share, 10),
                    Style::default().fg(theme::ACCENT),
                ),
                Span::styled(format!(" {:.1}%", c.share), theme::dim_style()),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
