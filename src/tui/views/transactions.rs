//! Transactions tab
//!
//! Every transaction, newest first, with the selected row highlighted.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{category_color, panel};
use crate::display::{format_signed, truncate};
use crate::models::TransactionKind;
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Transactions ({}) ", app.transactions.len());
    let block = panel(&title);

    if app.transactions.is_empty() {
        let text = Paragraph::new("No transactions. Add one with: fintrack transaction add")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let symbol = app.settings.currency_symbol.as_str();
    let date_format = app.settings.date_format.as_str();

    let header = Row::new(vec!["Date", "Description", "Category", "Type", "Amount"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .map(|txn| {
            let amount_color = match txn.kind {
                TransactionKind::Income => Color::Green,
                TransactionKind::Expense => Color::Red,
            };
            Row::new(vec![
                Cell::from(txn.date.format(date_format).to_string()),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(Span::styled(
                    txn.category.name(),
                    Style::default().fg(category_color(txn.category)),
                )),
                Cell::from(txn.kind.to_string()),
                Cell::from(Span::styled(
                    format!("{:>14}", format_signed(txn.amount, txn.kind, symbol)),
                    Style::default().fg(amount_color),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(16),
            Constraint::Length(8),
            Constraint::Length(15),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.selected_transaction_index));
    frame.render_stateful_widget(table, area, &mut state);
}
