//! Monthly budget vs spent series
//!
//! One point per month that has at least one budget: the sum of that
//! month's budgets against all expense spending in the month.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, Money, Month, Transaction};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyBudgetPoint {
    pub month: Month,
    pub budgeted: Money,
    /// Every expense in the month, budgeted category or not
    pub spent: Money,
}

/// Budgeted vs spent per budgeted month, oldest first
pub fn monthly_budget_series(
    transactions: &[Transaction],
    budgets: &[Budget],
) -> Vec<MonthlyBudgetPoint> {
    let mut budgeted: BTreeMap<Month, Money> = BTreeMap::new();
    for budget in budgets {
        *budgeted.entry(budget.month).or_default() += budget.amount;
    }

    budgeted
        .into_iter()
        .map(|(month, budgeted)| MonthlyBudgetPoint {
            month,
            budgeted,
            spent: transactions
                .iter()
                .filter(|t| t.is_expense() && month.contains(t.date))
                .map(|t| t.amount)
                .sum(),
        })
        .collect()
}

/// Monthly budget report
#[derive(Debug, Clone, Default)]
pub struct MonthlyBudgetReport {
    pub points: Vec<MonthlyBudgetPoint>,
}

impl MonthlyBudgetReport {
    pub fn compute(transactions: &[Transaction], budgets: &[Budget]) -> Self {
        Self {
            points: monthly_budget_series(transactions, budgets),
        }
    }

    /// Generate the report from storage
    pub fn generate(storage: &Storage) -> FintrackResult<Self> {
        Ok(Self::compute(
            &storage.transactions.get_all()?,
            &storage.budgets.get_all()?,
        ))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str("Monthly Budget vs Spent\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.points.is_empty() {
            output.push_str("No budgets set.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>15} {:>15} {:>15}\n",
            "Month", "Budgeted", "Spent", "Difference"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for point in &self.points {
            output.push_str(&format!(
                "{:<10} {:>15} {:>15} {:>15}\n",
                point.month.to_string(),
                point.budgeted.format_grouped(symbol),
                point.spent.format_grouped(symbol),
                (point.budgeted - point.spent).format_grouped(symbol)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(writer, "Month,Budgeted,Spent")
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        for point in &self.points {
            writeln!(
                writer,
                "{},{},{}",
                point.month,
                point.budgeted.to_decimal_string(),
                point.spent.to_decimal_string()
            )
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
