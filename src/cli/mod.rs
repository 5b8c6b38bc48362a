//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod export;
pub mod import;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::{handle_import_command, ImportCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Category, Money, Month, TransactionKind};

/// Transaction type as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

pub(crate) fn parse_amount(raw: &str) -> FintrackResult<Money> {
    Money::parse(raw).map_err(|e| {
        FintrackError::Validation(format!(
            "Invalid amount '{}': {}. Use a format like '50' or '12.34'",
            raw, e
        ))
    })
}

pub(crate) fn parse_date(raw: &str) -> FintrackResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        FintrackError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", raw))
    })
}

pub(crate) fn parse_month(raw: &str) -> FintrackResult<Month> {
    Month::parse(raw).map_err(|e| {
        FintrackError::Validation(format!(
            "Invalid month '{}': {}. Use 'Jan 2025' or '2025-01'",
            raw, e
        ))
    })
}

pub(crate) fn parse_category(raw: &str) -> FintrackResult<Category> {
    raw.parse::<Category>().map_err(|e| {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.name()).collect();
        FintrackError::Validation(format!("{}. Known categories: {}", e, names.join(", ")))
    })
}

pub(crate) fn parse_optional_month(raw: Option<String>) -> FintrackResult<Option<Month>> {
    raw.as_deref().map(parse_month).transpose()
}
