//! Storage layer for fintrack
//!
//! Keeps all records in memory and mirrors them to JSON files with atomic
//! whole-file writes. Mutations are recorded in the audit log.

pub mod budget;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use budget::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use transactions::TransactionRepository;

use serde::Serialize;
use tracing::{debug, info};

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FintrackPaths;
use crate::error::FintrackResult;
use crate::models::{Budget, Transaction};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FintrackPaths,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FintrackPaths) -> FintrackResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Create storage and load everything from disk
    pub fn open(paths: FintrackPaths) -> FintrackResult<Self> {
        let mut storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> FintrackResult<()> {
        self.transactions.load()?;
        self.budgets.load()?;
        debug!(base = %self.paths.base_dir().display(), "storage loaded");
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> FintrackResult<()> {
        self.transactions.save()?;
        self.budgets.save()?;
        Ok(())
    }

    /// Replace every record with the given set and persist
    ///
    /// Used by full JSON import. Each replaced record is audited as a
    /// delete and each new record as a create.
    pub fn replace_all(
        &self,
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
    ) -> FintrackResult<()> {
        for txn in self.transactions.get_all()? {
            self.log_delete(EntityType::Transaction, txn.id.to_string(), Some(txn.to_string()), &txn)?;
        }
        for budget in self.budgets.get_all()? {
            self.log_delete(EntityType::Budget, budget.id.to_string(), Some(budget.to_string()), &budget)?;
        }

        for txn in &transactions {
            self.log_create(EntityType::Transaction, txn.id.to_string(), Some(txn.to_string()), txn)?;
        }
        for budget in &budgets {
            self.log_create(EntityType::Budget, budget.id.to_string(), Some(budget.to_string()), budget)?;
        }

        info!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "replacing all data"
        );
        self.transactions.replace_all(transactions)?;
        self.budgets.replace_all(budgets)?;
        self.save_all()
    }

    /// Check if fintrack has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FintrackResult<()> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        debug!(entity = %entry.entity_type, id = %entry.entity_id, "audit create");
        self.audit.log(&entry)
    }

    /// Record an update in the audit log, with a diff of the changed fields
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> FintrackResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after, diff);
        debug!(entity = %entry.entity_type, id = %entry.entity_id, "audit update");
        self.audit.log(&entry)
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FintrackResult<()> {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity);
        debug!(entity = %entry.entity_type, id = %entry.entity_id, "audit delete");
        self.audit.log(&entry)
    }
}
