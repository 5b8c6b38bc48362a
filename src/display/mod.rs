//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables, colors, and chart bars.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::{format_budget_details, format_budget_list};
pub use report::{format_bar, format_money_colored, format_percentage, format_signed, truncate};
pub use transaction::{format_transaction_details, format_transaction_list};
