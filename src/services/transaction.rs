//! Transaction service
//!
//! Provides business logic for transaction management: validated CRUD,
//! lookup by short id, and filtered listing.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Category, Money, Month, Transaction, TransactionId, TransactionKind};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only transactions dated within this month
    pub month: Option<Month>,
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        self.kind.map_or(true, |k| txn.kind == k)
            && self.category.map_or(true, |c| txn.category == c)
            && self.search.as_ref().map_or(true, |needle| {
                txn.description
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub date: NaiveDate,
    pub amount: Money,
    pub description: String,
    pub kind: TransactionKind,
    pub category: Category,
}

/// Field changes for an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
}

impl UpdateTransactionInput {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.kind.is_none()
            && self.category.is_none()
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FintrackResult<Transaction> {
        let txn = Transaction::new(
            input.date,
            input.amount,
            input.kind,
            input.category,
            input.description.trim(),
        );

        txn.validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.to_string()),
            &txn,
        )?;

        info!(id = %txn.id, kind = txn.kind.as_str(), amount = %txn.amount, "transaction added");
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FintrackResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full UUID, prefixed id, or unambiguous short id
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }

        let mut matches: Vec<_> = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| t.id.matches_prefix(identifier))
            .collect();

        match matches.len() {
            0 | 1 => Ok(matches.pop()),
            n => Err(FintrackError::Validation(format!(
                "Identifier '{}' is ambiguous ({} transactions match)",
                identifier, n
            ))),
        }
    }

    /// Find a transaction or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> FintrackResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::transaction_not_found(identifier))
    }

    /// List transactions, newest first
    pub fn list(&self, filter: TransactionFilter) -> FintrackResult<Vec<Transaction>> {
        let mut transactions = match filter.month {
            Some(month) => self.storage.transactions.get_by_month(month)?,
            None => self.storage.transactions.get_all()?,
        };

        transactions.retain(|t| filter.matches(t));

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        debug!(count = transactions.len(), "listed transactions");
        Ok(transactions)
    }

    /// Apply field changes to a transaction
    ///
    /// The result is validated as a whole, so switching the type without a
    /// category valid for the new type is rejected.
    pub fn update(
        &self,
        id: TransactionId,
        changes: UpdateTransactionInput,
    ) -> FintrackResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FintrackError::transaction_not_found(id.to_string()))?;

        let before = txn.clone();

        if let Some(date) = changes.date {
            txn.date = date;
        }
        if let Some(amount) = changes.amount {
            txn.amount = amount;
        }
        if let Some(description) = changes.description {
            txn.description = description.trim().to_string();
        }
        if let Some(kind) = changes.kind {
            txn.kind = kind;
        }
        if let Some(category) = changes.category {
            txn.category = category;
        }

        txn.validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;
        txn.touch();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.to_string()),
            &before,
            &txn,
        )?;

        info!(id = %txn.id, "transaction updated");
        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> FintrackResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FintrackError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            id.to_string(),
            Some(txn.to_string()),
            &txn,
        )?;

        info!(id = %id, "transaction deleted");
        Ok(txn)
    }

    pub fn count(&self) -> FintrackResult<usize> {
        self.storage.transactions.count()
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(
        d: NaiveDate,
        cents: i64,
        kind: TransactionKind,
        category: Category,
        description: &str,
    ) -> CreateTransactionInput {
        CreateTransactionInput {
            date: d,
            amount: Money::from_cents(cents),
            description: description.to_string(),
            kind,
            category,
        }
    }

    #[test]
    fn test_create_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(input(
                date(2025, 1, 15),
                4500,
                TransactionKind::Expense,
                Category::Food,
                "  Groceries ",
            ))
            .unwrap();

        assert_eq!(txn.description, "Groceries");
        assert_eq!(service.count().unwrap(), 1);
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let zero = service.create(input(
            date(2025, 1, 1),
            0,
            TransactionKind::Expense,
            Category::Food,
            "x",
        ));
        assert!(zero.unwrap_err().is_validation());

        let blank = service.create(input(
            date(2025, 1, 1),
            100,
            TransactionKind::Expense,
            Category::Food,
            "   ",
        ));
        assert!(blank.unwrap_err().is_validation());

        let wrong_category = service.create(input(
            date(2025, 1, 1),
            100,
            TransactionKind::Income,
            Category::Housing,
            "Rent",
        ));
        assert!(wrong_category.unwrap_err().is_validation());

        assert_eq!(service.count().unwrap(), 0);
        assert_eq!(storage.audit().entry_count().unwrap(), 0);
    }

    #[test]
    fn test_list_filters_and_order() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service
            .create(input(date(2025, 1, 5), 300000, TransactionKind::Income, Category::Salary, "Paycheck"))
            .unwrap();
        service
            .create(input(date(2025, 1, 20), 4500, TransactionKind::Expense, Category::Food, "Groceries"))
            .unwrap();
        service
            .create(input(date(2025, 2, 3), 1200, TransactionKind::Expense, Category::Food, "Coffee beans"))
            .unwrap();

        let all = service.list(TransactionFilter::new()).unwrap();
        let descriptions: Vec<_> = all.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Coffee beans", "Groceries", "Paycheck"]);

        let jan = Month::new(2025, 1).unwrap();
        assert_eq!(service.list(TransactionFilter::new().month(jan)).unwrap().len(), 2);

        let expenses = service
            .list(TransactionFilter::new().kind(TransactionKind::Expense))
            .unwrap();
        assert_eq!(expenses.len(), 2);

        let searched = service.list(TransactionFilter::new().search("COFFEE")).unwrap();
        assert_eq!(searched.len(), 1);

        let limited = service.list(TransactionFilter::new().limit(1)).unwrap();
        assert_eq!(limited[0].description, "Coffee beans");
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(input(date(2025, 1, 15), 4500, TransactionKind::Expense, Category::Food, "Lunch"))
            .unwrap();

        let short = txn.id.to_string();
        assert_eq!(service.find(&short).unwrap().unwrap().id, txn.id);

        let full = txn.id.as_uuid().to_string();
        assert_eq!(service.find(&full).unwrap().unwrap().id, txn.id);

        assert!(service.find("txn-zzzzzzzz").unwrap().is_none());
        assert!(service.require("txn-zzzzzzzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(input(date(2025, 1, 15), 4500, TransactionKind::Expense, Category::Food, "Lunch"))
            .unwrap();

        let updated = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    amount: Some(Money::from_cents(5200)),
                    category: Some(Category::Entertainment),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount.cents(), 5200);
        assert_eq!(updated.category, Category::Entertainment);
        assert_eq!(updated.description, "Lunch");

        let entries = storage.audit().read_all().unwrap();
        let diff = entries[1].diff_summary.as_deref().unwrap();
        assert!(diff.contains("amount: $45.00 -> $52.00"));
    }

    #[test]
    fn test_update_kind_requires_compatible_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(input(date(2025, 1, 15), 4500, TransactionKind::Expense, Category::Food, "Lunch"))
            .unwrap();

        let err = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    kind: Some(TransactionKind::Income),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        // Unchanged in storage
        let stored = service.get(txn.id).unwrap().unwrap();
        assert_eq!(stored.kind, TransactionKind::Expense);

        // Gifts is valid for both kinds
        let ok = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    kind: Some(TransactionKind::Income),
                    category: Some(Category::Gifts),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(ok.is_income());
    }

    #[test]
    fn test_delete_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(input(date(2025, 1, 15), 4500, TransactionKind::Expense, Category::Food, "Lunch"))
            .unwrap();

        service.delete(txn.id).unwrap();
        assert_eq!(service.count().unwrap(), 0);
        assert!(service.delete(txn.id).unwrap_err().is_not_found());
    }
}
