//! Transaction categories
//!
//! Categories come from a fixed list. Expense and income transactions each
//! have their own allowed subset; `Gifts` and `Other` appear in both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transaction::TransactionKind;

/// A category label used to group transactions and budgets
///
/// Variant order is the canonical display order used to break ties in
/// reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Housing,
    Transportation,
    Food,
    Utilities,
    Entertainment,
    Healthcare,
    Shopping,
    Education,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    Debt,
    Savings,
    Travel,
    Gifts,
    Other,
    Salary,
    Freelance,
    Business,
    Investments,
    Rental,
}

impl Category {
    /// Categories allowed for expense transactions and budgets
    pub const EXPENSE: [Category; 14] = [
        Category::Housing,
        Category::Transportation,
        Category::Food,
        Category::Utilities,
        Category::Entertainment,
        Category::Healthcare,
        Category::Shopping,
        Category::Education,
        Category::PersonalCare,
        Category::Debt,
        Category::Savings,
        Category::Travel,
        Category::Gifts,
        Category::Other,
    ];

    /// Categories allowed for income transactions
    pub const INCOME: [Category; 7] = [
        Category::Salary,
        Category::Freelance,
        Category::Business,
        Category::Investments,
        Category::Rental,
        Category::Gifts,
        Category::Other,
    ];

    /// Every category, in canonical order
    pub const ALL: [Category; 19] = [
        Category::Housing,
        Category::Transportation,
        Category::Food,
        Category::Utilities,
        Category::Entertainment,
        Category::Healthcare,
        Category::Shopping,
        Category::Education,
        Category::PersonalCare,
        Category::Debt,
        Category::Savings,
        Category::Travel,
        Category::Gifts,
        Category::Other,
        Category::Salary,
        Category::Freelance,
        Category::Business,
        Category::Investments,
        Category::Rental,
    ];

    /// The categories a transaction of the given kind may use
    pub fn for_kind(kind: TransactionKind) -> &'static [Category] {
        match kind {
            TransactionKind::Income => &Self::INCOME,
            TransactionKind::Expense => &Self::EXPENSE,
        }
    }

    pub fn is_allowed_for(&self, kind: TransactionKind) -> bool {
        Self::for_kind(kind).contains(self)
    }

    pub fn is_expense_category(&self) -> bool {
        self.is_allowed_for(TransactionKind::Expense)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Food => "Food",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Shopping => "Shopping",
            Self::Education => "Education",
            Self::PersonalCare => "Personal Care",
            Self::Debt => "Debt",
            Self::Savings => "Savings",
            Self::Travel => "Travel",
            Self::Gifts => "Gifts",
            Self::Other => "Other",
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Business => "Business",
            Self::Investments => "Investments",
            Self::Rental => "Rental",
        }
    }

    /// Chart colour as a `#RRGGBB` hex string
    pub fn color(&self) -> &'static str {
        match self {
            Self::Housing => "#FF6384",
            Self::Transportation => "#36A2EB",
            Self::Food => "#FFCE56",
            Self::Utilities => "#4BC0C0",
            Self::Entertainment => "#9966FF",
            Self::Healthcare => "#FF9F40",
            Self::Shopping => "#C9CBCF",
            Self::Education => "#7FD13B",
            Self::PersonalCare => "#EA5F94",
            Self::Debt => "#607D8B",
            Self::Savings => "#1E88E5",
            Self::Travel => "#FFA726",
            Self::Gifts => "#8BC34A",
            Self::Other => "#9E9E9E",
            Self::Salary => "#66BB6A",
            Self::Freelance => "#26C6DA",
            Self::Business => "#42A5F5",
            Self::Investments => "#5C6BC0",
            Self::Rental => "#AB47BC",
        }
    }

    /// Chart colour as RGB components
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.color()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .iter()
            .find(|c| c.name().replace(' ', "").to_ascii_lowercase() == normalized)
            .copied()
            .ok_or_else(|| CategoryParseError::Unknown(s.trim().to_string()))
    }
}

/// Error type for category parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    Unknown(String),
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryParseError::Unknown(s) => write!(f, "Unknown category: {}", s),
        }
    }
}

impl std::error::Error for CategoryParseError {}
