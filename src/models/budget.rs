//! Budget model
//!
//! A budget is a planned spending cap for one expense category in one
//! calendar month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::BudgetId;
use super::money::Money;
use super::month::Month;

/// A monthly spending cap for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The category this budget caps (always an expense category)
    pub category: Category,

    /// Amount budgeted for the month
    pub amount: Money,

    /// The month this budget applies to
    pub month: Month,

    /// When this budget was created
    pub created_at: DateTime<Utc>,

    /// When this budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(category: Category, month: Month, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            category,
            amount,
            month,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the budgeted amount
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Mark the budget as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        if !self.category.is_expense_category() {
            return Err(BudgetValidationError::NotAnExpenseCategory(self.category));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.month, self.category, self.amount)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount(Money),
    NotAnExpenseCategory(Category),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be a positive number (got {})", amount)
            }
            Self::NotAnExpenseCategory(category) => write!(
                f,
                "Budgets can only be set for expense categories, not '{}'",
                category
            ),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
