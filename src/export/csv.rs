//! CSV Export functionality
//!
//! Exports transactions and budgets to CSV. The transaction columns match
//! what the CSV importer reads, so an export can be imported again.

use std::io::Write;

use csv::Writer;

use crate::error::{FintrackError, FintrackResult};
use crate::models::Month;
use crate::storage::Storage;

fn export_err(e: csv::Error) -> FintrackError {
    FintrackError::Export(e.to_string())
}

/// Export all transactions to CSV, newest first
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> FintrackResult<usize> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer
        .write_record(["id", "date", "description", "amount", "type", "category"])
        .map_err(export_err)?;

    let transactions = storage.transactions.get_all()?;
    for txn in &transactions {
        csv_writer
            .write_record([
                txn.id.as_uuid().to_string(),
                txn.date.format("%Y-%m-%d").to_string(),
                txn.description.clone(),
                txn.amount.to_decimal_string(),
                txn.kind.as_str().to_string(),
                txn.category.to_string(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| FintrackError::Export(e.to_string()))?;
    Ok(transactions.len())
}

/// Export budgets to CSV, optionally only those for one month
pub fn export_budgets_csv<W: Write>(
    storage: &Storage,
    writer: W,
    month: Option<Month>,
) -> FintrackResult<usize> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer
        .write_record(["id", "month", "category", "amount"])
        .map_err(export_err)?;

    let budgets = match month {
        Some(m) => storage.budgets.get_by_month(m)?,
        None => storage.budgets.get_all()?,
    };
    for budget in &budgets {
        csv_writer
            .write_record([
                budget.id.as_uuid().to_string(),
                budget.month.to_string(),
                budget.category.to_string(),
                budget.amount.to_decimal_string(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| FintrackError::Export(e.to_string()))?;
    Ok(budgets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FintrackPaths;
    use crate::models::{Budget, Category, Money, Transaction, TransactionKind};
    use crate::services::ImportService;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_export_transactions_csv() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .transactions
            .upsert(Transaction::new(
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                Money::from_cents(4599),
                TransactionKind::Expense,
                Category::PersonalCare,
                "Haircut, tip included",
            ))
            .unwrap();

        let mut output = Vec::new();
        let count = export_transactions_csv(&storage, &mut output).unwrap();
        assert_eq!(count, 1);

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("id,date,description,amount,type,category\n"));
        assert!(text.contains("2025-01-15,\"Haircut, tip included\",45.99,expense,Personal Care"));
    }

    #[test]
    fn test_exported_transactions_reimport() {
        let (_temp_dir, source) = create_test_storage();
        source
            .transactions
            .upsert(Transaction::new(
                NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                Money::from_cents(320000),
                TransactionKind::Income,
                Category::Salary,
                "Payroll",
            ))
            .unwrap();

        let mut output = Vec::new();
        export_transactions_csv(&source, &mut output).unwrap();

        let (_other_dir, target) = create_test_storage();
        let summary = ImportService::new(&target)
            .import_csv(output.as_slice(), false)
            .unwrap();
        assert_eq!(summary.imported_count(), 1);
        assert!(summary.errors.is_empty());

        let imported = target.transactions.get_all().unwrap();
        assert_eq!(imported[0].amount.cents(), 320000);
        assert!(imported[0].is_income());
    }

    #[test]
    fn test_export_budgets_csv_for_month() {
        let (_temp_dir, storage) = create_test_storage();
        let jan = Month::new(2025, 1).unwrap();
        let feb = Month::new(2025, 2).unwrap();
        storage
            .budgets
            .upsert(Budget::new(Category::Food, jan, Money::from_cents(50000)))
            .unwrap();
        storage
            .budgets
            .upsert(Budget::new(Category::Food, feb, Money::from_cents(45000)))
            .unwrap();

        let mut output = Vec::new();
        let count = export_budgets_csv(&storage, &mut output, Some(feb)).unwrap();
        assert_eq!(count, 1);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Feb 2025,Food,450.00"));
        assert!(!text.contains("Jan 2025"));
    }
}
