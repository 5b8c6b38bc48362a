//! Overview report
//!
//! Total income, total expenses and the resulting balance across every
//! recorded transaction.

use crate::display::format_money_colored;
use crate::error::FintrackResult;
use crate::models::{Money, Transaction};
use crate::storage::Storage;

/// All-time totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overview {
    pub total_income: Money,
    pub total_expenses: Money,
    /// `total_income - total_expenses`
    pub balance: Money,
    pub transaction_count: usize,
}

impl Overview {
    /// Compute totals over a set of transactions
    pub fn compute(transactions: &[Transaction]) -> Self {
        let (total_income, total_expenses) = transactions.iter().fold(
            (Money::zero(), Money::zero()),
            |(income, expenses), txn| {
                if txn.is_income() {
                    (income + txn.amount, expenses)
                } else {
                    (income, expenses + txn.amount)
                }
            },
        );

        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            transaction_count: transactions.len(),
        }
    }

    /// Compute totals over everything in storage
    pub fn generate(storage: &Storage) -> FintrackResult<Self> {
        Ok(Self::compute(&storage.transactions.get_all()?))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str("Overview\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            "Total Income",
            self.total_income.format_grouped(symbol)
        ));
        output.push_str(&format!(
            "{:<20} {:>19}\n",
            "Total Expenses",
            self.total_expenses.format_grouped(symbol)
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        // Pad on the plain text; colour codes would throw the width off
        let plain = self.balance.format_grouped(symbol);
        output.push_str(&format!(
            "{:<20} {}{}\n",
            "Balance",
            " ".repeat(19usize.saturating_sub(plain.chars().count())),
            format_money_colored(self.balance, symbol)
        ));
        output.push_str(&format!("\n{} transaction(s)\n", self.transaction_count));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionKind};
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, category: Category, cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            Money::from_cents(cents),
            kind,
            category,
            "test",
        )
    }

    #[test]
    fn test_empty() {
        let overview = Overview::compute(&[]);
        assert_eq!(overview, Overview::default());
    }

    #[test]
    fn test_totals_and_balance() {
        let txns = vec![
            txn(TransactionKind::Income, Category::Salary, 300000),
            txn(TransactionKind::Income, Category::Freelance, 50000),
            txn(TransactionKind::Expense, Category::Housing, 120000),
            txn(TransactionKind::Expense, Category::Food, 4550),
        ];

        let overview = Overview::compute(&txns);
        assert_eq!(overview.total_income.cents(), 350000);
        assert_eq!(overview.total_expenses.cents(), 124550);
        assert_eq!(overview.balance.cents(), 225450);
        assert_eq!(overview.transaction_count, 4);
    }

    #[test]
    fn test_negative_balance() {
        let txns = vec![
            txn(TransactionKind::Income, Category::Salary, 1000),
            txn(TransactionKind::Expense, Category::Food, 2500),
        ];
        assert_eq!(Overview::compute(&txns).balance.cents(), -1500);
    }

    #[test]
    fn test_format_terminal() {
        let txns = vec![txn(TransactionKind::Income, Category::Salary, 123456)];
        let text = Overview::compute(&txns).format_terminal("$");
        assert!(text.contains("$1,234.56"));
        assert!(text.contains("Balance"));
    }
}
