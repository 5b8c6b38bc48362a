//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Records are cached here and reloaded from storage after every change.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::config::Settings;
use crate::models::{Budget, Month, Transaction};
use crate::reports::budget_comparison;
use crate::services::{BudgetService, TransactionService};
use crate::storage::Storage;

/// Which tab is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Transactions,
    Budgets,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::Transactions, Tab::Budgets];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
            Self::Budgets => "Budgets",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Transactions => 1,
            Self::Budgets => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// A deletion waiting for the user to confirm, holding the record as it
/// was when the delete was requested
#[derive(Debug, Clone)]
pub enum PendingDelete {
    Transaction(Transaction),
    Budget(Budget),
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Confirm(PendingDelete),
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Date used as "today" for the current month and insights
    pub today: NaiveDate,

    /// Whether the app should quit
    pub should_quit: bool,

    pub active_tab: Tab,

    pub active_dialog: ActiveDialog,

    /// All transactions, newest first
    pub transactions: Vec<Transaction>,

    pub selected_transaction_index: usize,

    /// Every budget, for the dashboard series
    pub budgets: Vec<Budget>,

    /// Month shown on the budgets tab
    pub budget_month: Month,

    /// Budgets of `budget_month`, in category order
    pub month_budgets: Vec<Budget>,

    pub selected_budget_index: usize,

    /// Status message to display
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App instance and load its data
    pub fn new(storage: &'a Storage, settings: &'a Settings, today: NaiveDate) -> Result<Self> {
        let mut app = Self {
            storage,
            settings,
            today,
            should_quit: false,
            active_tab: Tab::default(),
            active_dialog: ActiveDialog::default(),
            transactions: Vec::new(),
            selected_transaction_index: 0,
            budgets: Vec::new(),
            budget_month: Month::from_date(today),
            month_budgets: Vec::new(),
            selected_budget_index: 0,
            status_message: None,
        };
        app.refresh()?;
        Ok(app)
    }

    /// Reload cached records from storage and keep selections in range
    pub fn refresh(&mut self) -> Result<()> {
        self.transactions = self.storage.transactions.get_all()?;
        self.budgets = self.storage.budgets.get_all()?;
        // Same order as the budget vs actual table so j/k walk its rows
        let rows = budget_comparison(&self.transactions, &self.budgets, self.budget_month);
        let mut month_budgets = BudgetService::new(self.storage).list(Some(self.budget_month))?;
        month_budgets.sort_by_key(|b| {
            rows.iter()
                .position(|r| r.category == b.category)
                .unwrap_or(usize::MAX)
        });
        self.month_budgets = month_budgets;

        self.selected_transaction_index =
            clamp_index(self.selected_transaction_index, self.transactions.len());
        self.selected_budget_index = clamp_index(self.selected_budget_index, self.month_budgets.len());
        debug!(
            transactions = self.transactions.len(),
            budgets = self.budgets.len(),
            "dashboard data refreshed"
        );
        Ok(())
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.status_message = None;
    }

    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// The months selectable on the budgets tab, newest first
    pub fn month_options(&self) -> Vec<Month> {
        Month::recent(self.settings.month_window.max(1), Month::from_date(self.today))
    }

    /// Step the budgets tab to an older month, staying inside the window
    pub fn previous_month(&mut self) -> Result<()> {
        let options = self.month_options();
        let candidate = self.budget_month.prev();
        if options.contains(&candidate) {
            self.select_month(candidate)?;
        }
        Ok(())
    }

    /// Step the budgets tab to a newer month, staying inside the window
    pub fn next_month(&mut self) -> Result<()> {
        let options = self.month_options();
        let candidate = self.budget_month.next();
        if options.contains(&candidate) {
            self.select_month(candidate)?;
        }
        Ok(())
    }

    fn select_month(&mut self, month: Month) -> Result<()> {
        self.budget_month = month;
        self.selected_budget_index = 0;
        self.refresh()
    }

    pub fn move_down(&mut self) {
        match self.active_tab {
            Tab::Transactions => {
                if self.selected_transaction_index + 1 < self.transactions.len() {
                    self.selected_transaction_index += 1;
                }
            }
            Tab::Budgets => {
                if self.selected_budget_index + 1 < self.month_budgets.len() {
                    self.selected_budget_index += 1;
                }
            }
            Tab::Dashboard => {}
        }
    }

    pub fn move_up(&mut self) {
        match self.active_tab {
            Tab::Transactions => {
                self.selected_transaction_index = self.selected_transaction_index.saturating_sub(1)
            }
            Tab::Budgets => {
                self.selected_budget_index = self.selected_budget_index.saturating_sub(1)
            }
            Tab::Dashboard => {}
        }
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.selected_transaction_index)
    }

    pub fn selected_budget(&self) -> Option<&Budget> {
        self.month_budgets.get(self.selected_budget_index)
    }

    /// Ask for confirmation before deleting the selected record
    pub fn request_delete(&mut self) {
        let pending = match self.active_tab {
            Tab::Transactions => self
                .selected_transaction()
                .cloned()
                .map(PendingDelete::Transaction),
            Tab::Budgets => self.selected_budget().cloned().map(PendingDelete::Budget),
            Tab::Dashboard => None,
        };

        if let Some(pending) = pending {
            self.open_dialog(ActiveDialog::Confirm(pending));
        }
    }

    /// Carry out the deletion held by the confirm dialog
    pub fn confirm_delete(&mut self) -> Result<()> {
        let ActiveDialog::Confirm(pending) = std::mem::take(&mut self.active_dialog) else {
            return Ok(());
        };

        let message = match pending {
            PendingDelete::Transaction(txn) => {
                let deleted = TransactionService::new(self.storage).delete(txn.id)?;
                format!("Transaction deleted: {}", deleted.description)
            }
            PendingDelete::Budget(budget) => {
                let deleted = BudgetService::new(self.storage).delete(budget.id)?;
                format!("Budget deleted: {}", deleted)
            }
        };

        self.refresh()?;
        self.set_status(message);
        Ok(())
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FintrackPaths;
    use crate::models::{Category, Money, TransactionKind};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage, Settings::default())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn add_txn(storage: &Storage, day: u32, description: &str) {
        storage
            .transactions
            .upsert(Transaction::new(
                NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
                Money::from_cents(1000),
                TransactionKind::Expense,
                Category::Food,
                description,
            ))
            .unwrap();
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Dashboard.next(), Tab::Transactions);
        assert_eq!(Tab::Budgets.next(), Tab::Dashboard);
    }

    #[test]
    fn test_month_window_bounds() {
        let (_dir, storage, settings) = setup();
        let mut app = App::new(&storage, &settings, today()).unwrap();
        assert_eq!(app.budget_month, Month::new(2025, 6).unwrap());

        // Cannot move past the current month
        app.next_month().unwrap();
        assert_eq!(app.budget_month, Month::new(2025, 6).unwrap());

        // Seven months: Jun back to Dec of the previous year
        for _ in 0..10 {
            app.previous_month().unwrap();
        }
        assert_eq!(app.budget_month, Month::new(2024, 12).unwrap());
    }

    #[test]
    fn test_selection_and_delete_flow() {
        let (_dir, storage, settings) = setup();
        add_txn(&storage, 1, "older");
        add_txn(&storage, 9, "newer");

        let mut app = App::new(&storage, &settings, today()).unwrap();
        app.switch_tab(Tab::Transactions);
        assert_eq!(app.selected_transaction().unwrap().description, "newer");

        app.move_down();
        app.move_down();
        assert_eq!(app.selected_transaction_index, 1);

        app.request_delete();
        assert!(matches!(
            &app.active_dialog,
            ActiveDialog::Confirm(PendingDelete::Transaction(txn)) if txn.description == "older"
        ));

        app.confirm_delete().unwrap();
        assert!(!app.has_dialog());
        assert_eq!(app.transactions.len(), 1);
        assert_eq!(app.selected_transaction_index, 0);
        assert_eq!(app.transactions[0].description, "newer");
        assert!(app.status_message.as_deref().unwrap().contains("older"));
    }

    #[test]
    fn test_delete_budget() {
        let (_dir, storage, settings) = setup();
        storage
            .budgets
            .upsert(Budget::new(
                Category::Food,
                Month::new(2025, 6).unwrap(),
                Money::from_cents(20000),
            ))
            .unwrap();

        let mut app = App::new(&storage, &settings, today()).unwrap();
        app.switch_tab(Tab::Budgets);
        assert_eq!(app.month_budgets.len(), 1);

        app.request_delete();
        app.confirm_delete().unwrap();
        assert!(app.month_budgets.is_empty());
        assert_eq!(storage.budgets.count().unwrap(), 0);
    }

    #[test]
    fn test_budget_selection_follows_table_order() {
        let (_dir, storage, settings) = setup();
        let june = Month::new(2025, 6).unwrap();
        for (category, cents) in [
            (Category::Housing, 1000),
            (Category::Food, 90000),
            (Category::Travel, 50000),
        ] {
            storage
                .budgets
                .upsert(Budget::new(category, june, Money::from_cents(cents)))
                .unwrap();
        }

        let mut app = App::new(&storage, &settings, today()).unwrap();
        app.switch_tab(Tab::Budgets);

        let table: Vec<_> = budget_comparison(&app.transactions, &app.budgets, june)
            .iter()
            .map(|r| r.category)
            .collect();
        assert_eq!(table, vec![Category::Food, Category::Travel, Category::Housing]);

        let mut visited = vec![app.selected_budget().unwrap().category];
        for _ in 0..2 {
            app.move_down();
            visited.push(app.selected_budget().unwrap().category);
        }
        assert_eq!(visited, table);

        // Deleting targets the highlighted row
        app.request_delete();
        assert!(matches!(
            &app.active_dialog,
            ActiveDialog::Confirm(PendingDelete::Budget(b)) if b.category == Category::Housing
        ));
    }

    #[test]
    fn test_request_delete_on_empty_list_is_noop() {
        let (_dir, storage, settings) = setup();
        let mut app = App::new(&storage, &settings, today()).unwrap();
        app.switch_tab(Tab::Transactions);
        app.request_delete();
        assert!(!app.has_dialog());
    }
}
