//! Spending insights
//!
//! Short textual observations about recent spending: the largest expense
//! category this month and the month-over-month change in total expenses.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::error::FintrackResult;
use crate::models::{Category, Money, Month, Transaction};
use crate::storage::Storage;

use super::monthly::monthly_summary;

/// Tone of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Info,
    Warning,
    Success,
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Success => write!(f, "success"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub kind: InsightKind,
    pub text: String,
}

impl Insight {
    fn new(kind: InsightKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Expense spending within one month
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthSpending {
    pub total: Money,
    /// Only categories with spending appear
    pub by_category: BTreeMap<Category, Money>,
}

impl MonthSpending {
    /// The category with the most spending; ties go to the earlier category
    pub fn highest(&self) -> Option<(Category, Money)> {
        self.by_category
            .iter()
            .fold(None, |best: Option<(Category, Money)>, (&cat, &amount)| match best {
                Some((_, top)) if top >= amount => best,
                _ => Some((cat, amount)),
            })
    }
}

/// Sum expense transactions dated within `month`, in total and per category
pub fn current_month_spending(transactions: &[Transaction], month: Month) -> MonthSpending {
    let mut spending = MonthSpending::default();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date))
    {
        spending.total += txn.amount;
        *spending.by_category.entry(txn.category).or_default() += txn.amount;
    }
    spending
}

/// Derive insights from the transaction history
///
/// `today` picks the current month; `threshold_percent` is the minimum
/// month-over-month change in expenses worth reporting.
pub fn spending_insights(
    transactions: &[Transaction],
    today: NaiveDate,
    threshold_percent: f64,
    currency_symbol: &str,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if transactions.is_empty() {
        insights.push(Insight::new(
            InsightKind::Info,
            "Start by adding some transactions to get spending insights",
        ));
        return insights;
    }

    let current = current_month_spending(transactions, Month::from_date(today));
    if let Some((category, amount)) = current.highest().filter(|(_, a)| a.is_positive()) {
        insights.push(Insight::new(
            InsightKind::Warning,
            format!(
                "Your highest expense category is {} with {}",
                category,
                amount.format_grouped(currency_symbol)
            ),
        ));
    }

    let months = monthly_summary(transactions);
    if let [.., previous, latest] = months.as_slice() {
        // No baseline to compare against
        if previous.expense.is_positive() {
            let change = (latest.expense.cents() - previous.expense.cents()) as f64
                / previous.expense.cents() as f64
                * 100.0;

            if change > threshold_percent {
                insights.push(Insight::new(
                    InsightKind::Warning,
                    format!(
                        "Your spending increased by {:.1}% compared to last month",
                        change
                    ),
                ));
            } else if change < -threshold_percent {
                insights.push(Insight::new(
                    InsightKind::Success,
                    format!(
                        "Your spending decreased by {:.1}% compared to last month",
                        change.abs()
                    ),
                ));
            }
        }
    }

    if insights.is_empty() {
        insights.push(Insight::new(
            InsightKind::Info,
            "Add more transaction data to get detailed spending insights",
        ));
    }

    insights
}

/// Insights report
#[derive(Debug, Clone, Default)]
pub struct InsightsReport {
    pub insights: Vec<Insight>,
}

impl InsightsReport {
    /// Generate insights from storage
    pub fn generate(
        storage: &Storage,
        today: NaiveDate,
        threshold_percent: f64,
        currency_symbol: &str,
    ) -> FintrackResult<Self> {
        Ok(Self {
            insights: spending_insights(
                &storage.transactions.get_all()?,
                today,
                threshold_percent,
                currency_symbol,
            ),
        })
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str("Spending Insights\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for insight in &self.insights {
            let marker = match insight.kind {
                InsightKind::Info => "i",
                InsightKind::Warning => "!",
                InsightKind::Success => "+",
            };
            output.push_str(&format!("[{}] {}\n", marker, insight.text));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(y: i32, m: u32, category: Category, cents: i64) -> Transaction {
        Transaction::new(
            date(y, m, 10),
            Money::from_cents(cents),
            TransactionKind::Expense,
            category,
            "test",
        )
    }

    fn income(y: i32, m: u32, cents: i64) -> Transaction {
        Transaction::new(
            date(y, m, 1),
            Money::from_cents(cents),
            TransactionKind::Income,
            Category::Salary,
            "pay",
        )
    }

    #[test]
    fn test_no_transactions() {
        let insights = spending_insights(&[], date(2025, 3, 15), 10.0, "$");
        assert_eq!(
            insights,
            vec![Insight::new(
                InsightKind::Info,
                "Start by adding some transactions to get spending insights"
            )]
        );
    }

    #[test]
    fn test_highest_category_current_month() {
        let txns = vec![
            expense(2025, 3, Category::Food, 20000),
            expense(2025, 3, Category::Food, 5050),
            expense(2025, 3, Category::Travel, 15000),
            // Larger, but last month
            expense(2025, 2, Category::Housing, 25000),
        ];

        let insights = spending_insights(&txns, date(2025, 3, 20), 10.0, "$");
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert_eq!(
            insights[0].text,
            "Your highest expense category is Food with $250.50"
        );
    }

    #[test]
    fn test_spending_increase() {
        let txns = vec![
            expense(2025, 2, Category::Food, 10000),
            expense(2025, 3, Category::Food, 12500),
        ];

        let insights = spending_insights(&txns, date(2025, 3, 20), 10.0, "$");
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[1].kind, InsightKind::Warning);
        assert_eq!(
            insights[1].text,
            "Your spending increased by 25.0% compared to last month"
        );
    }

    #[test]
    fn test_spending_decrease() {
        let txns = vec![
            expense(2025, 1, Category::Food, 20000),
            expense(2025, 2, Category::Food, 15000),
        ];

        // Today is in a month with no spending: no highest-category insight
        let insights = spending_insights(&txns, date(2025, 4, 1), 10.0, "$");
        assert_eq!(
            insights,
            vec![Insight::new(
                InsightKind::Success,
                "Your spending decreased by 25.0% compared to last month"
            )]
        );
    }

    #[test]
    fn test_small_change_not_reported() {
        let txns = vec![
            expense(2025, 1, Category::Food, 10000),
            expense(2025, 2, Category::Food, 10500),
        ];

        let insights = spending_insights(&txns, date(2025, 4, 1), 10.0, "$");
        assert_eq!(
            insights,
            vec![Insight::new(
                InsightKind::Info,
                "Add more transaction data to get detailed spending insights"
            )]
        );
    }

    #[test]
    fn test_zero_previous_expense_skips_comparison() {
        let txns = vec![income(2025, 1, 500000), expense(2025, 2, Category::Food, 10000)];

        let insights = spending_insights(&txns, date(2025, 5, 1), 10.0, "$");
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Info);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let txns = vec![
            expense(2025, 1, Category::Food, 10000),
            expense(2025, 2, Category::Food, 10500),
        ];

        let insights = spending_insights(&txns, date(2025, 4, 1), 2.0, "$");
        assert_eq!(
            insights[0].text,
            "Your spending increased by 5.0% compared to last month"
        );
    }

    #[test]
    fn test_report_format() {
        let report = InsightsReport {
            insights: spending_insights(&[], date(2025, 1, 1), 10.0, "$"),
        };
        assert!(report
            .format_terminal()
            .contains("[i] Start by adding some transactions"));
    }

    #[test]
    fn test_current_month_spending() {
        let txns = vec![
            expense(2025, 3, Category::Food, 100),
            expense(2025, 3, Category::Food, 200),
            expense(2025, 3, Category::Debt, 300),
            expense(2025, 2, Category::Food, 999),
            income(2025, 3, 5000),
        ];

        let spending = current_month_spending(&txns, Month::new(2025, 3).unwrap());
        assert_eq!(spending.total.cents(), 600);
        assert_eq!(spending.by_category[&Category::Food].cents(), 300);
        assert_eq!(spending.by_category.len(), 2);
        // Tie between Food and Debt goes to the earlier category
        assert_eq!(spending.highest(), Some((Category::Food, Money::from_cents(300))));
    }
}
