//! Budget repository for JSON storage
//!
//! Manages loading and saving monthly category budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::FintrackError;
use crate::models::{Budget, BudgetId, Category, Month};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Month first, then canonical category order
fn by_month_then_category(a: &Budget, b: &Budget) -> std::cmp::Ordering {
    a.month.cmp(&b.month).then(a.category.cmp(&b.category))
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: BudgetData = read_json(&self.path)?;
        debug!(
            count = file_data.budgets.len(),
            path = %self.path.display(),
            "loaded budgets"
        );
        self.replace_all(file_data.budgets)
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let budgets = self.get_all()?;
        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    /// Replace the in-memory contents
    pub fn replace_all(&self, budgets: Vec<Budget>) -> Result<(), FintrackError> {
        let mut map = self
            .budgets
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        map.clear();
        map.extend(budgets.into_iter().map(|b| (b.id, b)));
        Ok(())
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, FintrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&id).cloned())
    }

    /// Get all budgets, sorted by month then category
    pub fn get_all(&self) -> Result<Vec<Budget>, FintrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(by_month_then_category);
        Ok(list)
    }

    /// Get all budgets for a month, in category order
    pub fn get_by_month(&self, month: Month) -> Result<Vec<Budget>, FintrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| b.month == month)
            .cloned()
            .collect();
        list.sort_by(by_month_then_category);
        Ok(list)
    }

    /// Find the budget for a category in a month, if one exists
    pub fn find_for(
        &self,
        category: Category,
        month: Month,
    ) -> Result<Option<Budget>, FintrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets
            .values()
            .find(|b| b.category == category && b.month == month)
            .cloned())
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), FintrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Delete a budget, returning whether it existed
    pub fn delete(&self, id: BudgetId) -> Result<bool, FintrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budgets.remove(&id).is_some())
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, FintrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.len())
    }
}
