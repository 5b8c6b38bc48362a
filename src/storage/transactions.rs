//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::FintrackError;
use crate::models::{Month, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Newest first: date descending, then creation time descending
pub(crate) fn newest_first(a: &Transaction, b: &Transaction) -> std::cmp::Ordering {
    b.date
        .cmp(&a.date)
        .then(b.created_at.cmp(&a.created_at))
}

/// Repository for transaction persistence with a by-month index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: month -> transaction_ids
    by_month: RwLock<HashMap<Month, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_month: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: TransactionData = read_json(&self.path)?;
        debug!(
            count = file_data.transactions.len(),
            path = %self.path.display(),
            "loaded transactions"
        );
        self.replace_all(file_data.transactions)
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let transactions = self.get_all()?;
        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Replace the in-memory contents and rebuild the index
    pub fn replace_all(&self, transactions: Vec<Transaction>) -> Result<(), FintrackError> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_month = self.by_month.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_month.clear();

        for txn in transactions {
            by_month.entry(txn.month()).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Get transactions dated within a month, newest first
    pub fn get_by_month(&self, month: Month) -> Result<Vec<Transaction>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_month = self.by_month.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_month.get(&month).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Months that contain at least one transaction, oldest first
    pub fn months(&self) -> Result<Vec<Month>, FintrackError> {
        let by_month = self.by_month.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut months: Vec<_> = by_month
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(month, _)| *month)
            .collect();
        months.sort();
        Ok(months)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), FintrackError> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_month = self.by_month.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        // A date change can move the transaction to another month
        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_month.get_mut(&old.month()) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_month.entry(txn.month()).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, FintrackError> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_month = self.by_month.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.remove(&id) {
            Some(txn) => {
                if let Some(ids) = by_month.get_mut(&txn.month()) {
                    ids.retain(|&tid| tid != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
