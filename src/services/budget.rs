//! Budget service
//!
//! Provides business logic for monthly category budgets. At most one budget
//! exists per category and month.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, BudgetId, Category, Money, Month};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new budget
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub category: Category,
    pub month: Month,
    pub amount: Money,
}

/// Field changes for an existing budget; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    pub category: Option<Category>,
    pub month: Option<Month>,
    pub amount: Option<Money>,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new budget
    pub fn create(&self, input: CreateBudgetInput) -> FintrackResult<Budget> {
        let budget = Budget::new(input.category, input.month, input.amount);

        budget
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;
        self.ensure_unique(&budget)?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.to_string()),
            &budget,
        )?;

        info!(id = %budget.id, category = %budget.category, month = %budget.month, "budget added");
        Ok(budget)
    }

    /// Reject a budget whose category and month are already taken by another
    fn ensure_unique(&self, budget: &Budget) -> FintrackResult<()> {
        match self.storage.budgets.find_for(budget.category, budget.month)? {
            Some(existing) if existing.id != budget.id => {
                Err(FintrackError::budget_exists(budget.category, budget.month))
            }
            _ => Ok(()),
        }
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> FintrackResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by full UUID, prefixed id, or unambiguous short id
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<Budget>> {
        if let Ok(id) = identifier.parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }

        let mut matches: Vec<_> = self
            .storage
            .budgets
            .get_all()?
            .into_iter()
            .filter(|b| b.id.matches_prefix(identifier))
            .collect();

        match matches.len() {
            0 | 1 => Ok(matches.pop()),
            n => Err(FintrackError::Validation(format!(
                "Identifier '{}' is ambiguous ({} budgets match)",
                identifier, n
            ))),
        }
    }

    /// Find a budget or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> FintrackResult<Budget> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::budget_not_found(identifier))
    }

    /// List budgets sorted by month then category, optionally for one month
    pub fn list(&self, month: Option<Month>) -> FintrackResult<Vec<Budget>> {
        match month {
            Some(month) => self.storage.budgets.get_by_month(month),
            None => self.storage.budgets.get_all(),
        }
    }

    /// Apply field changes to a budget
    pub fn update(&self, id: BudgetId, changes: UpdateBudgetInput) -> FintrackResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| FintrackError::budget_not_found(id.to_string()))?;

        let before = budget.clone();

        if let Some(category) = changes.category {
            budget.category = category;
        }
        if let Some(month) = changes.month {
            budget.month = month;
        }
        if let Some(amount) = changes.amount {
            budget.set_amount(amount);
        }

        budget
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;
        self.ensure_unique(&budget)?;
        budget.touch();

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.to_string()),
            &before,
            &budget,
        )?;

        info!(id = %budget.id, "budget updated");
        Ok(budget)
    }

    /// Delete a budget
    pub fn delete(&self, id: BudgetId) -> FintrackResult<Budget> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| FintrackError::budget_not_found(id.to_string()))?;

        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::Budget,
            id.to_string(),
            Some(budget.to_string()),
            &budget,
        )?;

        info!(id = %id, "budget deleted");
        Ok(budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn month(m: u32) -> Month {
        Month::new(2025, m).unwrap()
    }

    fn input(category: Category, m: u32, cents: i64) -> CreateBudgetInput {
        CreateBudgetInput {
            category,
            month: month(m),
            amount: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_create_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service.create(input(Category::Food, 1, 50000)).unwrap();
        assert_eq!(budget.amount.cents(), 50000);
        assert_eq!(service.list(None).unwrap().len(), 1);
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_invalid() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert!(service
            .create(input(Category::Food, 1, 0))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(input(Category::Salary, 1, 100))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_duplicate_category_month_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.create(input(Category::Food, 1, 50000)).unwrap();
        let err = service.create(input(Category::Food, 1, 100)).unwrap_err();
        assert!(matches!(err, FintrackError::Duplicate { .. }));

        // Same category in another month is fine
        service.create(input(Category::Food, 2, 100)).unwrap();
    }

    #[test]
    fn test_list_by_month() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.create(input(Category::Travel, 1, 100)).unwrap();
        service.create(input(Category::Housing, 1, 100)).unwrap();
        service.create(input(Category::Food, 2, 100)).unwrap();

        let jan = service.list(Some(month(1))).unwrap();
        assert_eq!(jan.len(), 2);
        assert_eq!(jan[0].category, Category::Housing);

        let all = service.list(None).unwrap();
        assert_eq!(all.last().unwrap().month, month(2));
    }

    #[test]
    fn test_update_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service.create(input(Category::Food, 1, 50000)).unwrap();
        let updated = service
            .update(
                budget.id,
                UpdateBudgetInput {
                    amount: Some(Money::from_cents(60000)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount.cents(), 60000);
        assert!(updated.updated_at >= budget.updated_at);
        assert_eq!(updated.created_at, budget.created_at);

        // Updating without changing category/month is not a duplicate of itself
        service
            .update(
                budget.id,
                UpdateBudgetInput {
                    month: Some(month(1)),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    #[test]
    fn test_update_into_taken_slot_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.create(input(Category::Food, 1, 100)).unwrap();
        let other = service.create(input(Category::Housing, 1, 100)).unwrap();

        let err = service
            .update(
                other.id,
                UpdateBudgetInput {
                    category: Some(Category::Food),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, FintrackError::Duplicate { .. }));
    }

    #[test]
    fn test_find_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service.create(input(Category::Food, 1, 100)).unwrap();
        let found = service.require(&budget.id.to_string()).unwrap();
        assert_eq!(found.id, budget.id);

        service.delete(budget.id).unwrap();
        assert!(service.list(None).unwrap().is_empty());
        assert!(service.delete(budget.id).unwrap_err().is_not_found());
    }
}
