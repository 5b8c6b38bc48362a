//! Budgets tab
//!
//! Month selector, budget vs actual for the selected month, and the
//! budgeted vs spent history across months.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{bar_value, panel};
use crate::display::format_percentage;
use crate::reports::{BudgetComparisonReport, BudgetComparisonRow, MonthlyBudgetReport};
use crate::tui::app::App;
use crate::tui::layout::BudgetLayout;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = BudgetLayout::new(area);

    render_month_selector(frame, app, layout.header);
    render_comparison(frame, app, layout.comparison);
    render_series(frame, app, layout.series);
}

fn render_month_selector(frame: &mut Frame, app: &App, area: Rect) {
    // Oldest on the left so [ and ] move in the direction they point
    let mut spans = vec![Span::styled("◀ [  ", Style::default().fg(Color::DarkGray))];
    for month in app.month_options().into_iter().rev() {
        let style = if month == app.budget_month {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", month), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(" ]  ▶", Style::default().fg(Color::DarkGray)));

    let title = format!(" Budgets: {} ", app.budget_month.long_name());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(panel(&title)), area);
}

fn render_comparison(frame: &mut Frame, app: &App, area: Rect) {
    let report = BudgetComparisonReport::compute(&app.transactions, &app.budgets, app.budget_month);
    let symbol = app.settings.currency_symbol.as_str();

    let title = format!(
        " Budget vs Actual  {} of {} ",
        report.total_actual.format_grouped(symbol),
        report.total_budget.format_grouped(symbol)
    );
    let block = panel(&title);

    if report.rows.is_empty() {
        let text = Paragraph::new("No budgets for this month. Add one with: fintrack budget add")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let header = Row::new(vec!["Category", "Budget", "Actual", "Remaining", "Used"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = report
        .rows
        .iter()
        .map(|row| comparison_row(row, symbol))
        .collect();

    // Highlight the comparison row of the selected budget
    let selected = app
        .selected_budget()
        .and_then(|b| report.rows.iter().position(|r| r.category == b.category));

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

fn comparison_row(row: &BudgetComparisonRow, symbol: &str) -> Row<'static> {
    let style = if row.is_over_budget() {
        Style::default().fg(Color::Red)
    } else if row.is_unbudgeted() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let used = if row.is_unbudgeted() {
        "-".to_string()
    } else {
        format_percentage(row.percent_used())
    };

    Row::new(vec![
        Cell::from(row.category.name()),
        Cell::from(row.budget.format_grouped(symbol)),
        Cell::from(row.actual.format_grouped(symbol)),
        Cell::from(row.remaining.format_grouped(symbol)),
        Cell::from(used),
    ])
    .style(style)
}

fn render_series(frame: &mut Frame, app: &App, area: Rect) {
    let report = MonthlyBudgetReport::compute(&app.transactions, &app.budgets);
    let start = report.points.len().saturating_sub(app.settings.chart_months);
    let points = &report.points[start..];

    let block = panel(" Budgeted vs Spent ");
    if points.is_empty() {
        frame.render_widget(
            Paragraph::new("No budgets set.")
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

    for point in points {
        let spent_color = if point.spent > point.budgeted {
            Color::Red
        } else {
            Color::Green
        };
        let group = BarGroup::default()
            .label(Line::from(point.month.short_name()))
            .bars(&[
                Bar::default()
                    .value(bar_value(point.budgeted))
                    .text_value(String::new())
                    .style(Style::default().fg(Color::Blue)),
                Bar::default()
                    .value(bar_value(point.spent))
                    .text_value(String::new())
                    .style(Style::default().fg(spent_color)),
            ]);
        chart = chart.data(group);
    }

    frame.render_widget(chart, area);
}
