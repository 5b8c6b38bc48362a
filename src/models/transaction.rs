//! Transaction model
//!
//! A transaction is a single recorded money movement. Amounts are always
//! stored as positive values; the direction comes from the transaction kind.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;
use super::month::Month;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(TransactionValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Amount (always positive; see `kind`)
    pub amount: Money,

    /// Transaction date
    pub date: NaiveDate,

    /// Free-text description
    pub description: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub category: Category,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        date: NaiveDate,
        amount: Money,
        kind: TransactionKind,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            amount,
            date,
            description: description.into(),
            kind,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The calendar month this transaction falls in
    pub fn month(&self) -> Month {
        Month::from_date(self.date)
    }

    /// Amount signed by direction (income positive, expense negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Mark the transaction as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if !self.category.is_allowed_for(self.kind) {
            return Err(TransactionValidationError::CategoryNotAllowed {
                category: self.category,
                kind: self.kind,
            });
        }

        Ok(())
    }

    /// Key used to detect re-imported rows
    pub fn import_fingerprint(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.date.format("%Y-%m-%d"),
            self.amount.cents(),
            self.kind.as_str(),
            self.category,
            self.description.trim().to_lowercase()
        )
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    EmptyDescription,
    CategoryNotAllowed {
        category: Category,
        kind: TransactionKind,
    },
    UnknownKind(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be a positive number (got {})", amount)
            }
            Self::EmptyDescription => write!(f, "Description is required"),
            Self::CategoryNotAllowed { category, kind } => write!(
                f,
                "Category '{}' is not valid for {} transactions",
                category,
                kind.as_str()
            ),
            Self::UnknownKind(s) => {
                write!(f, "Unknown transaction type '{}' (use income or expense)", s)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
