//! Category breakdown report
//!
//! Expense totals per category with each category's share of total
//! spending, over all time or for a single month.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Category, Money, Month, Transaction};
use crate::storage::Storage;

/// Spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: Category,
    pub amount: Money,
    /// Chart colour (`#RRGGBB`)
    pub color: &'static str,
    /// Share of total spending, 0-100
    pub percentage: f64,
}

/// Expense totals per category, largest first
///
/// Income transactions are ignored. With `month` set, only expenses dated
/// within that month count. Categories with no spending are omitted.
pub fn category_breakdown(transactions: &[Transaction], month: Option<Month>) -> Vec<CategorySpending> {
    let mut totals: HashMap<Category, Money> = HashMap::new();

    for txn in transactions
        .iter()
        .filter(|t| t.is_expense())
        .filter(|t| month.map_or(true, |m| m.contains(t.date)))
    {
        *totals.entry(txn.category).or_default() += txn.amount;
    }

    let total: Money = totals.values().sum();

    let mut rows: Vec<_> = totals
        .into_iter()
        .filter(|(_, amount)| amount.is_positive())
        .map(|(category, amount)| CategorySpending {
            category,
            amount,
            color: category.color(),
            percentage: percentage_of(amount, total),
        })
        .collect();

    rows.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
    rows
}

pub(crate) fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}

/// Category breakdown report
#[derive(Debug, Clone, Default)]
pub struct CategoryBreakdownReport {
    /// `None` means all time
    pub month: Option<Month>,
    pub total: Money,
    pub rows: Vec<CategorySpending>,
}

impl CategoryBreakdownReport {
    pub fn compute(transactions: &[Transaction], month: Option<Month>) -> Self {
        let rows = category_breakdown(transactions, month);
        Self {
            month,
            total: rows.iter().map(|r| r.amount).sum(),
            rows,
        }
    }

    /// Generate the report from storage
    pub fn generate(storage: &Storage, month: Option<Month>) -> FintrackResult<Self> {
        let transactions = match month {
            Some(m) => storage.transactions.get_by_month(m)?,
            None => storage.transactions.get_all()?,
        };
        Ok(Self::compute(&transactions, month))
    }

    /// The `count` largest categories
    pub fn top(&self, count: usize) -> &[CategorySpending] {
        &self.rows[..count.min(self.rows.len())]
    }

    fn period_label(&self) -> String {
        self.month
            .map(|m| m.long_name())
            .unwrap_or_else(|| "All time".to_string())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("Spending by Category: {}\n", self.period_label()));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        output.push_str(&format!("{:<18} {:>14} {:>8}\n", "Category", "Amount", "%"));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<18} {:>14} {:>7.1}%  {}\n",
                row.category.name(),
                row.amount.format_grouped(symbol),
                row.percentage,
                crate::display::format_bar(row.percentage, 100.0, 20)
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>14}\n",
            "TOTAL",
            self.total.format_grouped(symbol)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(writer, "Period,Category,Amount,Percentage,Color")
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        let period = self.period_label();
        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{:.2},{}",
                period,
                row.category,
                row.amount.to_decimal_string(),
                row.percentage,
                row.color
            )
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn txn(m: u32, kind: TransactionKind, category: Category, cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, m, 10).unwrap(),
            Money::from_cents(cents),
            kind,
            category,
            "test",
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(1, TransactionKind::Expense, Category::Housing, 60000),
            txn(1, TransactionKind::Expense, Category::Food, 20000),
            txn(1, TransactionKind::Expense, Category::Food, 10000),
            txn(1, TransactionKind::Income, Category::Salary, 500000),
            txn(2, TransactionKind::Expense, Category::Travel, 10000),
            txn(2, TransactionKind::Income, Category::Gifts, 5000),
        ]
    }

    #[test]
    fn test_breakdown_all_time() {
        let rows = category_breakdown(&sample(), None);
        let cats: Vec<_> = rows.iter().map(|r| r.category).collect();
        assert_eq!(cats, vec![Category::Housing, Category::Food, Category::Travel]);

        assert_eq!(rows[0].amount.cents(), 60000);
        assert!((rows[0].percentage - 60.0).abs() < 1e-9);
        assert!((rows[1].percentage - 30.0).abs() < 1e-9);
        assert_eq!(rows[0].color, "#FF6384");
    }

    #[test]
    fn test_breakdown_for_month() {
        let feb = Month::new(2025, 2).unwrap();
        let rows = category_breakdown(&sample(), Some(feb));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, Category::Travel);
        assert!((rows[0].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_income_ignored() {
        let rows = category_breakdown(&sample(), None);
        assert!(rows.iter().all(|r| r.category != Category::Salary));
        assert!(rows.iter().all(|r| r.category != Category::Gifts));
    }

    #[test]
    fn test_ties_use_category_order() {
        let txns = vec![
            txn(1, TransactionKind::Expense, Category::Travel, 100),
            txn(1, TransactionKind::Expense, Category::Food, 100),
        ];
        let rows = category_breakdown(&txns, None);
        assert_eq!(rows[0].category, Category::Food);
    }

    #[test]
    fn test_report_top_and_total() {
        let report = CategoryBreakdownReport::compute(&sample(), None);
        assert_eq!(report.total.cents(), 100000);
        assert_eq!(report.top(2).len(), 2);
        assert_eq!(report.top(10).len(), 3);

        let empty = CategoryBreakdownReport::compute(&[], None);
        assert!(empty.format_terminal("$").contains("No expenses"));
    }

    #[test]
    fn test_export_csv() {
        let report = CategoryBreakdownReport::compute(&sample(), None);
        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("All time,Housing,600.00,60.00,#FF6384"));
    }
}
