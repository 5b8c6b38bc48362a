//! Service layer for fintrack
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, uniqueness rules and audit logging.

pub mod budget;
pub mod import;
pub mod transaction;

pub use budget::{BudgetService, CreateBudgetInput, UpdateBudgetInput};
pub use import::{ImportService, ImportSummary, RowError};
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
