//! Core data models for fintrack
//!
//! This module contains the data structures that represent the finance
//! domain: transactions, budgets, categories, months and money.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use budget::{Budget, BudgetValidationError};
pub use category::{Category, CategoryParseError};
pub use ids::{BudgetId, TransactionId};
pub use money::Money;
pub use month::{Month, MonthParseError};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
