//! TUI Views module
//!
//! The tab bar, one view per tab, the status bar, and any open dialog.

pub mod budgets;
pub mod dashboard;
pub mod status_bar;
pub mod transactions;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{ActiveDialog, App, Tab};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_tab {
        Tab::Dashboard => dashboard::render(frame, app, layout.main),
        Tab::Transactions => transactions::render(frame, app, layout.main),
        Tab::Budgets => budgets::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Confirm(pending) => dialogs::confirm::render(frame, pending, app.settings),
        ActiveDialog::None => {}
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!(" {} {} ", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" fintrack ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(app.active_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

    frame.render_widget(tabs, area);
}

/// Bordered block with the standard title styling
pub(crate) fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Chart colour for a category
pub(crate) fn category_color(category: crate::models::Category) -> Color {
    let (r, g, b) = category.rgb();
    Color::Rgb(r, g, b)
}

/// Scale cents down to whole units for bar heights
pub(crate) fn bar_value(amount: crate::models::Money) -> u64 {
    amount.dollars().max(0) as u64
}
