use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::money::format_amount;
use crate::planning::{percentage_used, StatusTier};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let [cards, chart, trend] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Min(10),
        Constraint::Length(3),
    ])
    .areas(area);

    render_cards(f, cards, app);
    render_spending(f, chart, app);
    render_trend(f, trend, app);
}

fn panel(title: String) -> Block<'static> {
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

struct Card {
    title: &'static str,
    amount: Decimal,
    color: Color,
    note: String,
}

fn render_cards(f: &mut Frame, area: Rect, app: &App) {
    let snapshot = &app.snapshot;
    let savings = snapshot.monthly_savings();

    let rate = if snapshot.monthly_income > Decimal::ZERO {
        format!("{}% of income", percentage_used(savings, snapshot.monthly_income).round())
    } else {
        "set :income".to_string()
    };
    let runway = match snapshot
        .current_savings
        .checked_div(snapshot.monthly_expenses)
        .filter(|_| snapshot.monthly_expenses > Decimal::ZERO)
    {
        Some(months) => format!("{} months of spending", months.floor()),
        None => "no spending yet".to_string(),
    };

    let cards = [
        Card {
            title: "Income",
            amount: snapshot.monthly_income,
            color: theme::GREEN,
            note: String::new(),
        },
        Card {
            title: "Spent",
            amount: snapshot.monthly_expenses,
            color: theme::RED,
            note: format!("{} categories", app.spending.len()),
        },
        Card {
            title: "Saved / month",
            amount: savings,
            color: theme::signed_color(savings >= Decimal::ZERO),
            note: rate,
        },
        Card {
            title: "Savings",
            amount: snapshot.current_savings,
            color: theme::ACCENT,
            note: runway,
        },
    ];

    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for (card, slot) in cards.into_iter().zip(areas.iter()) {
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                format_amount(card.amount),
                Style::default().fg(card.color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.note, theme::dim_style())),
        ])
        .centered()
        .block(panel(format!(" {} ", card.title)));
        f.render_widget(body, *slot);
    }
}

/// Bar colour follows the tier of the category's budget, if it has one.
fn category_color(app: &App, category: &str) -> Color {
    app.summary
        .lines
        .iter()
        .find(|line| line.budget.category.eq_ignore_ascii_case(category))
        .map(|line| theme::tier_color(line.status))
        .unwrap_or(theme::tier_color(StatusTier::Ok))
}

fn render_spending(f: &mut Frame, area: Rect, app: &App) {
    let block = panel(format!(" Where {} went ", app.current_month));

    if app.spending.is_empty() {
        let msg = Paragraph::new(Span::styled(
            "No expenses this month. Add one with :add or import a CSV with :import",
            theme::dim_style(),
        ))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .spending
        .iter()
        .take(12)
        .map(|spend| {
            let color = category_color(app, &spend.category);
            Bar::default()
                .value(spend.total.to_u64().unwrap_or(u64::MAX))
                .label(Line::from(truncate(&spend.category, 10)))
                .text_value(format!("{:.0}%", spend.share))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn render_trend(f: &mut Frame, area: Rect, app: &App) {
    let title = match (app.monthly_trend.first(), app.monthly_trend.last()) {
        (Some((from, _)), Some((to, latest))) => {
            format!(" Spending {from} to {to}, latest {} ", format_amount(*latest))
        }
        _ => " Spending trend ".to_string(),
    };
    let data: Vec<u64> = app
        .monthly_trend
        .iter()
        .map(|(_, total)| total.to_u64().unwrap_or(u64::MAX))
        .collect();

    let sparkline = Sparkline::default()
        .block(panel(title))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));
    f.render_widget(sparkline, area);
}
