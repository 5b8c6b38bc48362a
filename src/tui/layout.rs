//! Layout definitions for the TUI
//!
//! Tab bar on top, content in the middle, status bar at the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    pub tabs: Rect,
    pub main: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            tabs: vertical[0],
            main: vertical[1],
            status_bar: vertical[2],
        }
    }
}

/// Layout for the dashboard tab
pub struct DashboardLayout {
    /// Income / expenses / balance cards
    pub overview: Rect,
    /// Monthly bar chart
    pub monthly: Rect,
    /// Category breakdown
    pub categories: Rect,
    pub insights: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),      // Overview
                Constraint::Percentage(55), // Charts
                Constraint::Min(4),         // Insights
            ])
            .split(area);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);

        Self {
            overview: rows[0],
            monthly: charts[0],
            categories: charts[1],
            insights: rows[2],
        }
    }
}

/// Layout for the budgets tab
pub struct BudgetLayout {
    /// Month selector
    pub header: Rect,
    /// Budget vs actual table
    pub comparison: Rect,
    /// Monthly budget vs spent series
    pub series: Rect,
}

impl BudgetLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(60),
                Constraint::Min(5),
            ])
            .split(area);

        Self {
            header: chunks[0],
            comparison: chunks[1],
            series: chunks[2],
        }
    }
}

/// Create a centered rect for dialogs
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed_fits() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(50, 7, area);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 7);
        assert_eq!(rect.y, 1);
    }

    #[test]
    fn test_app_layout() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.tabs.height, 3);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.main.height, 20);
    }
}
