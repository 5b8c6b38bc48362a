//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use clap::Subcommand;
use tracing::debug;

use super::{parse_amount, parse_category, parse_date, parse_optional_month, KindArg};
use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_list};
use crate::error::FintrackResult;
use crate::services::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Amount (e.g., "50" or "12.34"); always positive
        amount: String,
        /// What the money was for
        description: String,
        /// Income or expense
        #[arg(short = 't', long = "type", value_enum, default_value = "expense")]
        kind: KindArg,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Only transactions in this month ("Jan 2025" or "2025-01")
        #[arg(short, long)]
        month: Option<String>,
        /// Only income or only expenses
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<KindArg>,
        /// Filter by category name
        #[arg(short, long)]
        category: Option<String>,
        /// Description contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<KindArg>,
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FintrackResult<()> {
    let service = TransactionService::new(storage);
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            description,
            kind,
            category,
            date,
        } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => chrono::Local::now().date_naive(),
            };

            let txn = service.create(CreateTransactionInput {
                date,
                amount: parse_amount(&amount)?,
                description,
                kind: kind.into(),
                category: parse_category(&category)?,
            })?;

            println!("Transaction added:");
            print!("{}", format_transaction_details(&txn, symbol, date_format));
        }

        TransactionCommands::List {
            month,
            kind,
            category,
            search,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(month) = parse_optional_month(month)? {
                filter = filter.month(month);
            }
            if let Some(kind) = kind {
                filter = filter.kind(kind.into());
            }
            if let Some(raw) = category {
                filter = filter.category(parse_category(&raw)?);
            }
            if let Some(text) = search {
                filter = filter.search(text);
            }
            debug!(?filter, "listing transactions");

            let transactions = service.list(filter)?;
            print!(
                "{}",
                format_transaction_list(&transactions, symbol, date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.require(&id)?;
            print!("{}", format_transaction_details(&txn, symbol, date_format));
        }

        TransactionCommands::Edit {
            id,
            amount,
            description,
            kind,
            category,
            date,
        } => {
            let txn = service.require(&id)?;

            let changes = UpdateTransactionInput {
                date: date.as_deref().map(parse_date).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
                kind: kind.map(Into::into),
                category: category.as_deref().map(parse_category).transpose()?,
            };

            if changes.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(txn.id, changes)?;
            println!("Transaction updated:");
            print!("{}", format_transaction_details(&updated, symbol, date_format));
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service.require(&id)?;

            if !force {
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(&txn, symbol, date_format));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(txn.id)?;
            println!(
                "Transaction deleted: {} ({} {})",
                deleted.id, deleted.date, deleted.description
            );
        }
    }

    Ok(())
}
