//! Transaction display formatting
//!
//! Table and detail views of transactions for the CLI.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_signed, truncate};
use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of transactions as a table
pub fn format_transaction_list(
    transactions: &[Transaction],
    symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.date.format(date_format).to_string(),
        description: truncate(&txn.description, 30),
        category: txn.category.to_string(),
        kind: txn.kind.to_string(),
        amount: format_signed(txn.amount, txn.kind, symbol),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output.push_str(&format!("{} transaction(s)\n", transactions.len()));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Full ID:     {}\n", txn.id.as_uuid()));
    output.push_str(&format!("  Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!("  Type:        {}\n", txn.kind));
    output.push_str(&format!("  Amount:      {}\n", txn.amount.format_grouped(symbol)));
    output.push_str(&format!("  Category:    {}\n", txn.category));
    output.push_str(&format!("  Description: {}\n", txn.description));
    output.push_str(&format!(
        "  Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if txn.updated_at != txn.created_at {
        output.push_str(&format!(
            "  Updated:     {}\n",
            txn.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}
