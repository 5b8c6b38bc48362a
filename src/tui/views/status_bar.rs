//! Status bar view
//!
//! Shows the overall balance, the budget month, the last status message,
//! and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::reports::Overview;
use crate::tui::app::{App, Tab};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let overview = Overview::compute(&app.transactions);
    let symbol = app.settings.currency_symbol.as_str();

    let mut spans = vec![];

    let balance_color = if overview.balance.is_negative() {
        Color::Red
    } else {
        Color::Green
    };

    spans.push(Span::styled(" Balance: ", Style::default().fg(Color::White)));
    spans.push(Span::styled(
        overview.balance.format_grouped(symbol),
        Style::default()
            .fg(balance_color)
            .add_modifier(Modifier::BOLD),
    ));

    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        format!("{} txns", overview.transaction_count),
        Style::default().fg(Color::White),
    ));

    if app.active_tab == Tab::Budgets {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            app.budget_month.long_name(),
            Style::default().fg(Color::Cyan),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }

    // Key hints (right-aligned)
    let hints = " q:Quit  ?:Help  Tab:Switch ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
