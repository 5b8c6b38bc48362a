//! Dashboard tab
//!
//! Overview totals, monthly income vs expenses, spending by category and
//! insights.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::{bar_value, category_color, panel};
use crate::display::format_bar;
use crate::reports::{
    category_breakdown, spending_insights, InsightKind, MonthlyReport, Overview,
};
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = DashboardLayout::new(area);

    render_overview(frame, app, layout.overview);
    render_monthly_chart(frame, app, layout.monthly);
    render_categories(frame, app, layout.categories);
    render_insights(frame, app, layout.insights);
}

fn render_overview(frame: &mut Frame, app: &App, area: Rect) {
    let overview = Overview::compute(&app.transactions);
    let symbol = app.settings.currency_symbol.as_str();

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let balance_color = if overview.balance.is_negative() {
        Color::Red
    } else {
        Color::Green
    };

    let entries = [
        (" Total Income ", overview.total_income, Color::Green),
        (" Total Expenses ", overview.total_expenses, Color::Red),
        (" Balance ", overview.balance, balance_color),
    ];

    for ((title, amount, color), card) in entries.into_iter().zip(cards.iter()) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            amount.format_grouped(symbol),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(panel(title));
        frame.render_widget(paragraph, *card);
    }
}

fn render_monthly_chart(frame: &mut Frame, app: &App, area: Rect) {
    let report = MonthlyReport::compute(&app.transactions);
    let recent = report.last(app.settings.chart_months);

    let block = panel(" Monthly Income vs Expenses ");
    if recent.is_empty() {
        frame.render_widget(
            Paragraph::new("No transactions yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(5)
        .bar_gap(1)
        .group_gap(3);

    for month in recent {
        let group = BarGroup::default()
            .label(Line::from(month.month.short_name()))
            .bars(&[
                Bar::default()
                    .value(bar_value(month.income))
                    .text_value(String::new())
                    .style(Style::default().fg(Color::Green)),
                Bar::default()
                    .value(bar_value(month.expense))
                    .text_value(String::new())
                    .style(Style::default().fg(Color::Red)),
            ]);
        chart = chart.data(group);
    }

    frame.render_widget(chart, area);
}

fn render_categories(frame: &mut Frame, app: &App, area: Rect) {
    let rows = category_breakdown(&app.transactions, None);
    let symbol = app.settings.currency_symbol.as_str();
    let block = panel(" Spending by Category ");

    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("No expenses yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(Span::styled(
                    format!("■ {}", row.category),
                    Style::default().fg(category_color(row.category)),
                )),
                Cell::from(row.amount.format_grouped(symbol)),
                Cell::from(format!("{:>5.1}%", row.percentage)),
                Cell::from(Span::styled(
                    format_bar(row.percentage, 100.0, 10),
                    Style::default().fg(category_color(row.category)),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        table_rows,
        [
            Constraint::Min(16),
            Constraint::Length(14),
            Constraint::Length(7),
            Constraint::Length(10),
        ],
    )
    .block(block);

    frame.render_widget(table, area);
}

fn render_insights(frame: &mut Frame, app: &App, area: Rect) {
    let insights = spending_insights(
        &app.transactions,
        app.today,
        app.settings.insight_threshold_percent,
        &app.settings.currency_symbol,
    );

    let lines: Vec<Line> = insights
        .iter()
        .map(|insight| {
            let (marker, color) = match insight.kind {
                InsightKind::Info => ("ℹ ", Color::Blue),
                InsightKind::Warning => ("⚠ ", Color::Yellow),
                InsightKind::Success => ("✓ ", Color::Green),
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(color)),
                Span::styled(insight.text.clone(), Style::default().fg(color)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(panel(" Spending Insights "))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
