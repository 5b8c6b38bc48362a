//! Reports module for fintrack
//!
//! Aggregations over transactions and budgets: all-time overview, monthly
//! income/expense, category breakdown, budget vs actual, the monthly
//! budget series and spending insights.

pub mod budget_comparison;
pub mod categories;
pub mod insights;
pub mod monthly;
pub mod monthly_budget;
pub mod overview;

pub use budget_comparison::{budget_comparison, BudgetComparisonReport, BudgetComparisonRow};
pub use categories::{category_breakdown, CategoryBreakdownReport, CategorySpending};
pub use insights::{
    current_month_spending, spending_insights, Insight, InsightKind, InsightsReport, MonthSpending,
};
pub use monthly::{monthly_summary, MonthlyReport, MonthlySummary};
pub use monthly_budget::{monthly_budget_series, MonthlyBudgetPoint, MonthlyBudgetReport};
pub use overview::Overview;
