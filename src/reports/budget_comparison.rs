//! Budget vs actual report
//!
//! For one calendar month, compares each category's budget with what was
//! actually spent. Only expense transactions dated within the month count
//! toward `actual`, and `remaining` is always `budget - actual`.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, Category, Money, Month, Transaction};
use crate::storage::Storage;

use super::categories::percentage_of;

/// Budget and spending for one category in one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetComparisonRow {
    pub category: Category,
    /// Zero when the category was spent in but not budgeted
    pub budget: Money,
    pub actual: Money,
    /// `budget - actual`; negative when over budget
    pub remaining: Money,
}

impl BudgetComparisonRow {
    pub fn is_over_budget(&self) -> bool {
        self.budget.is_positive() && self.actual > self.budget
    }

    pub fn is_unbudgeted(&self) -> bool {
        self.budget.is_zero()
    }

    /// Share of the budget spent, 0-100+ (0 when there is no budget)
    pub fn percent_used(&self) -> f64 {
        percentage_of(self.actual, self.budget)
    }
}

/// Compare budgets with actual spending for a month
///
/// Rows cover every category budgeted that month plus every category with
/// expense spending that month. Sorted by budget descending, then actual
/// descending, then category order.
pub fn budget_comparison(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: Month,
) -> Vec<BudgetComparisonRow> {
    // category -> (budget, actual)
    let mut by_category: BTreeMap<Category, (Money, Money)> = BTreeMap::new();

    for budget in budgets.iter().filter(|b| b.month == month) {
        by_category.entry(budget.category).or_default().0 += budget.amount;
    }

    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date))
    {
        by_category.entry(txn.category).or_default().1 += txn.amount;
    }

    let mut rows: Vec<_> = by_category
        .into_iter()
        .map(|(category, (budget, actual))| BudgetComparisonRow {
            category,
            budget,
            actual,
            remaining: budget - actual,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.budget
            .cmp(&a.budget)
            .then(b.actual.cmp(&a.actual))
            .then(a.category.cmp(&b.category))
    });
    rows
}

/// Budget vs actual report for a month
#[derive(Debug, Clone)]
pub struct BudgetComparisonReport {
    pub month: Month,
    pub rows: Vec<BudgetComparisonRow>,
    pub total_budget: Money,
    pub total_actual: Money,
}

impl BudgetComparisonReport {
    pub fn compute(transactions: &[Transaction], budgets: &[Budget], month: Month) -> Self {
        let rows = budget_comparison(transactions, budgets, month);
        Self {
            month,
            total_budget: rows.iter().map(|r| r.budget).sum(),
            total_actual: rows.iter().map(|r| r.actual).sum(),
            rows,
        }
    }

    /// Generate the report from storage
    pub fn generate(storage: &Storage, month: Month) -> FintrackResult<Self> {
        let transactions = storage.transactions.get_by_month(month)?;
        let budgets = storage.budgets.get_by_month(month)?;
        Ok(Self::compute(&transactions, &budgets, month))
    }

    pub fn total_remaining(&self) -> Money {
        self.total_budget - self.total_actual
    }

    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetComparisonRow> {
        self.rows.iter().filter(|r| r.is_over_budget())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("Budget vs Actual: {}\n", self.month.long_name()));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets or expenses for this month.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<18} {:>14} {:>14} {:>14} {:>7}\n",
            "Category", "Budget", "Actual", "Remaining", "Used"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            let used = if row.is_unbudgeted() {
                "-".to_string()
            } else {
                format!("{:.0}%", row.percent_used())
            };
            let marker = if row.is_over_budget() { " !" } else { "" };
            output.push_str(&format!(
                "{:<18} {:>14} {:>14} {:>14} {:>7}{}\n",
                row.category.name(),
                row.budget.format_grouped(symbol),
                row.actual.format_grouped(symbol),
                row.remaining.format_grouped(symbol),
                used,
                marker
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>14} {:>14} {:>14}\n",
            "TOTAL",
            self.total_budget.format_grouped(symbol),
            self.total_actual.format_grouped(symbol),
            self.total_remaining().format_grouped(symbol)
        ));

        let over = self.over_budget().count();
        if over > 0 {
            output.push_str(&format!("\n{} categor{} over budget\n", over, if over == 1 { "y" } else { "ies" }));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(writer, "Month,Category,Budget,Actual,Remaining,Over Budget")
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                self.month,
                row.category,
                row.budget.to_decimal_string(),
                row.actual.to_decimal_string(),
                row.remaining.to_decimal_string(),
                row.is_over_budget()
            )
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
