//! Help dialog
//!
//! Shows keyboard shortcuts for the active tab

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{App, Tab};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_tab))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(tab: Tab) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Global Keys"),
        Line::from(""),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("1/2/3", "Dashboard / Transactions / Budgets"),
        key_line("Tab", "Next tab"),
        key_line("r", "Reload data"),
        Line::from(""),
    ];

    match tab {
        Tab::Dashboard => {
            lines.push(section("Dashboard"));
            lines.push(Line::from(""));
            lines.push(Line::from("Totals, monthly income and expenses, spending by"));
            lines.push(Line::from("category and insights. Add records with the CLI:"));
            lines.push(Line::from("  fintrack transaction add 12.50 Lunch -c food"));
        }
        Tab::Transactions => {
            lines.push(section("Transactions"));
            lines.push(Line::from(""));
            lines.push(key_line("j/k", "Move selection down/up"));
            lines.push(key_line("d", "Delete selected transaction"));
        }
        Tab::Budgets => {
            lines.push(section("Budgets"));
            lines.push(Line::from(""));
            lines.push(key_line("[/h", "Previous month"));
            lines.push(key_line("]/l", "Next month"));
            lines.push(key_line("j/k", "Move selection down/up"));
            lines.push(key_line("d", "Delete selected budget"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
