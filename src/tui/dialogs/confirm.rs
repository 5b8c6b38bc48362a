//! Delete confirmation dialog
//!
//! Shows the record about to be deleted so the user can check it before
//! pressing `y`.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::Settings;
use crate::display::{format_signed, truncate};
use crate::models::TransactionKind;
use crate::tui::app::PendingDelete;
use crate::tui::layout::centered_rect_fixed;

const WIDTH: u16 = 56;

/// Label/value pairs describing the pending deletion
pub fn detail_fields(pending: &PendingDelete, settings: &Settings) -> Vec<(&'static str, String)> {
    let symbol = settings.currency_symbol.as_str();
    match pending {
        PendingDelete::Transaction(txn) => vec![
            ("Date", txn.date.format(&settings.date_format).to_string()),
            ("Description", truncate(&txn.description, 36)),
            ("Amount", format_signed(txn.amount, txn.kind, symbol)),
            ("Category", txn.category.name().to_string()),
        ],
        PendingDelete::Budget(budget) => vec![
            ("Category", budget.category.name().to_string()),
            ("Month", budget.month.long_name()),
            ("Amount", budget.amount.format_grouped(symbol)),
        ],
    }
}

fn question(pending: &PendingDelete) -> &'static str {
    match pending {
        PendingDelete::Transaction(_) => "Delete this transaction?",
        PendingDelete::Budget(_) => "Delete this budget?",
    }
}

fn amount_color(pending: &PendingDelete) -> Color {
    match pending {
        PendingDelete::Transaction(txn) if txn.kind == TransactionKind::Income => Color::Green,
        PendingDelete::Transaction(_) => Color::Red,
        PendingDelete::Budget(_) => Color::Cyan,
    }
}

/// Render the confirmation dialog for a pending deletion
pub fn render(frame: &mut Frame, pending: &PendingDelete, settings: &Settings) {
    let fields = detail_fields(pending, settings);
    // Question, blank, fields, blank, keys, plus the border
    let height = fields.len() as u16 + 6;
    let area = centered_rect_fixed(WIDTH, height, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm Delete ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines = vec![
        Line::from(Span::styled(
            question(pending),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (label, value) in fields {
        let value_style = if label == "Amount" {
            Style::default().fg(amount_color(pending))
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>12}  ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Y]", Style::default().fg(Color::Green)),
        Span::raw(" Delete  "),
        Span::styled("[N/Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Keep"),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
