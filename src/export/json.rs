//! JSON Export functionality
//!
//! Exports all transactions and budgets to JSON with schema versioning, and
//! reads such an export back for a full restore.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,

    pub budgets: Vec<Budget>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub budget_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> FintrackResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budgets,
            metadata,
        })
    }

    /// Validate the export structure
    ///
    /// Checks the schema version, that every record passes model
    /// validation, that ids are unique, and that no category has two
    /// budgets in the same month.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut txn_ids = HashSet::new();
        for txn in &self.transactions {
            if !txn_ids.insert(txn.id) {
                return Err(format!("Duplicate transaction id {}", txn.id));
            }
            txn.validate()
                .map_err(|e| format!("Transaction {} is invalid: {}", txn.id, e))?;
        }

        let mut budget_ids = HashSet::new();
        let mut slots = HashSet::new();
        for budget in &self.budgets {
            if !budget_ids.insert(budget.id) {
                return Err(format!("Duplicate budget id {}", budget.id));
            }
            budget
                .validate()
                .map_err(|e| format!("Budget {} is invalid: {}", budget.id, e))?;
            if !slots.insert((budget.category, budget.month)) {
                return Err(format!(
                    "More than one {} budget for {}",
                    budget.category, budget.month
                ));
            }
        }

        Ok(())
    }
}

/// Export all data to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FintrackError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> FintrackResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| FintrackError::Import(e.to_string()))?;

    export.validate().map_err(FintrackError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FintrackPaths;
    use crate::models::{Category, Money, Month, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn seed(storage: &Storage) {
        for (day, cents) in [(3, 1200), (20, 4500)] {
            storage
                .transactions
                .upsert(Transaction::new(
                    NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                    Money::from_cents(cents),
                    TransactionKind::Expense,
                    Category::Food,
                    "Groceries",
                ))
                .unwrap();
        }
        storage
            .budgets
            .upsert(Budget::new(
                Category::Food,
                Month::new(2025, 1).unwrap(),
                Money::from_cents(30000),
            ))
            .unwrap();
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.transactions.len(), 2);
        assert_eq!(export.budgets.len(), 1);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-01-03"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2025-01-20"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip_and_restore() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let mut json_output = Vec::new();
        export_full_json(&storage, &mut json_output, true).unwrap();
        let json_string = String::from_utf8(json_output).unwrap();
        assert!(json_string.contains("\"month\": \"Jan 2025\""));
        assert!(json_string.contains("\"type\": \"expense\""));

        let imported = import_from_json(&json_string).unwrap();

        let (_other_dir, target) = create_test_storage();
        target
            .replace_all(imported.transactions, imported.budgets)
            .unwrap();
        assert_eq!(target.transactions.count().unwrap(), 2);
        assert_eq!(target.budgets.count().unwrap(), 1);
        // Two creates for transactions, one for the budget
        assert_eq!(target.audit().entry_count().unwrap(), 3);
    }

    #[test]
    fn test_rejects_wrong_schema() {
        let (_temp_dir, storage) = create_test_storage();
        let mut export = FullExport::from_storage(&storage).unwrap();
        export.schema_version = "0.1".into();
        let json = serde_json::to_string(&export).unwrap();

        let err = import_from_json(&json).unwrap_err();
        assert!(matches!(err, FintrackError::Import(_)));
    }

    #[test]
    fn test_rejects_duplicate_budget_slot() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);
        let mut export = FullExport::from_storage(&storage).unwrap();
        let extra = Budget::new(
            Category::Food,
            Month::new(2025, 1).unwrap(),
            Money::from_cents(100),
        );
        export.budgets.push(extra);

        assert!(export.validate().unwrap_err().contains("More than one Food budget"));
    }

    #[test]
    fn test_rejects_invalid_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);
        let mut export = FullExport::from_storage(&storage).unwrap();
        export.transactions[0].category = Category::Salary;

        assert!(export.validate().is_err());
    }
}
