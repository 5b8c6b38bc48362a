//! Monthly income/expense report
//!
//! Groups transactions by calendar month. Every month with at least one
//! transaction gets a row, in chronological order.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Month, Transaction};
use crate::storage::Storage;

/// Income and expense totals for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: Month,
    pub income: Money,
    pub expense: Money,
}

impl MonthlySummary {
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Sum income and expense per month, oldest month first
pub fn monthly_summary(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<Month, (Money, Money)> = BTreeMap::new();

    for txn in transactions {
        let entry = months.entry(txn.month()).or_default();
        if txn.is_income() {
            entry.0 += txn.amount;
        } else {
            entry.1 += txn.amount;
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expense))| MonthlySummary {
            month,
            income,
            expense,
        })
        .collect()
}

/// Monthly report
#[derive(Debug, Clone, Default)]
pub struct MonthlyReport {
    pub rows: Vec<MonthlySummary>,
}

impl MonthlyReport {
    pub fn compute(transactions: &[Transaction]) -> Self {
        Self {
            rows: monthly_summary(transactions),
        }
    }

    /// Generate the report from storage
    pub fn generate(storage: &Storage) -> FintrackResult<Self> {
        Ok(Self::compute(&storage.transactions.get_all()?))
    }

    /// The most recent `count` months with data, oldest first
    pub fn last(&self, count: usize) -> &[MonthlySummary] {
        let start = self.rows.len().saturating_sub(count);
        &self.rows[start..]
    }

    pub fn total_income(&self) -> Money {
        self.rows.iter().map(|r| r.income).sum()
    }

    pub fn total_expense(&self) -> Money {
        self.rows.iter().map(|r| r.expense).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str("Monthly Income & Expenses\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No transactions recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>15} {:>15} {:>15}\n",
            "Month", "Income", "Expense", "Net"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<10} {:>15} {:>15} {:>15}\n",
                row.month.to_string(),
                row.income.format_grouped(symbol),
                row.expense.format_grouped(symbol),
                row.net().format_grouped(symbol)
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>15} {:>15} {:>15}\n",
            "TOTAL",
            self.total_income().format_grouped(symbol),
            self.total_expense().format_grouped(symbol),
            (self.total_income() - self.total_expense()).format_grouped(symbol)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(writer, "Month,Income,Expense,Net")
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{}",
                row.month,
                row.income.to_decimal_string(),
                row.expense.to_decimal_string(),
                row.net().to_decimal_string()
            )
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionKind};
    use crate::reports::Overview;
    use chrono::NaiveDate;

    fn txn(y: i32, m: u32, d: u32, kind: TransactionKind, cents: i64) -> Transaction {
        let category = match kind {
            TransactionKind::Income => Category::Salary,
            TransactionKind::Expense => Category::Food,
        };
        Transaction::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Money::from_cents(cents),
            kind,
            category,
            "test",
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(2025, 2, 1, TransactionKind::Income, 300000),
            txn(2024, 12, 31, TransactionKind::Expense, 2000),
            txn(2025, 1, 15, TransactionKind::Expense, 4500),
            txn(2025, 1, 1, TransactionKind::Expense, 120000),
            txn(2025, 2, 28, TransactionKind::Expense, 999),
            txn(2025, 1, 31, TransactionKind::Income, 10000),
        ]
    }

    #[test]
    fn test_groups_by_month_chronologically() {
        let rows = monthly_summary(&sample());
        let months: Vec<_> = rows.iter().map(|r| r.month.to_string()).collect();
        assert_eq!(months, vec!["Dec 2024", "Jan 2025", "Feb 2025"]);

        assert_eq!(rows[1].income.cents(), 10000);
        assert_eq!(rows[1].expense.cents(), 124500);
        assert_eq!(rows[2].net().cents(), 300000 - 999);
    }

    #[test]
    fn test_months_partition_totals() {
        let txns = sample();
        let overview = Overview::compute(&txns);
        let report = MonthlyReport::compute(&txns);

        assert_eq!(report.total_income(), overview.total_income);
        assert_eq!(report.total_expense(), overview.total_expenses);
    }

    #[test]
    fn test_empty() {
        assert!(monthly_summary(&[]).is_empty());
        let report = MonthlyReport::default();
        assert!(report.format_terminal("$").contains("No transactions"));
        assert!(report.last(6).is_empty());
    }

    #[test]
    fn test_last_months() {
        let report = MonthlyReport::compute(&sample());
        let last_two = report.last(2);
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].month, Month::new(2025, 1).unwrap());
        assert_eq!(report.last(10).len(), 3);
    }

    #[test]
    fn test_export_csv() {
        let report = MonthlyReport::compute(&sample());
        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Month,Income,Expense,Net");
        assert_eq!(lines[1], "Dec 2024,0.00,20.00,-20.00");
        assert_eq!(lines.len(), 4);
    }
}
