//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Budget;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of budgets as a table
pub fn format_budget_list(budgets: &[Budget], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        id: b.id.to_string(),
        month: b.month.to_string(),
        category: b.category.to_string(),
        amount: b.amount.format_grouped(symbol),
    });

    let total: crate::models::Money = budgets.iter().map(|b| b.amount).sum();

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output.push_str(&format!(
        "{} budget(s), total {}\n",
        budgets.len(),
        total.format_grouped(symbol)
    ));
    output
}

/// Format a single budget's details
pub fn format_budget_details(budget: &Budget, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Budget: {}\n", budget.id));
    output.push_str(&format!("  Month:    {}\n", budget.month.long_name()));
    output.push_str(&format!("  Category: {}\n", budget.category));
    output.push_str(&format!("  Amount:   {}\n", budget.amount.format_grouped(symbol)));
    output
}
