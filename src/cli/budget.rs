//! Budget CLI commands
//!
//! Implements CLI commands for monthly category budgets.

use clap::Subcommand;

use super::{parse_amount, parse_category, parse_month, parse_optional_month};
use crate::config::Settings;
use crate::display::{format_budget_details, format_budget_list};
use crate::error::FintrackResult;
use crate::models::Month;
use crate::services::{BudgetService, CreateBudgetInput, UpdateBudgetInput};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a spending cap for a category in a month
    Add {
        /// Expense category name
        category: String,
        /// Budget amount (e.g., "500")
        amount: String,
        /// Month ("Jan 2025" or "2025-01"), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Create the same budget for this many consecutive months
        #[arg(long, default_value = "1")]
        repeat: usize,
    },
    /// List budgets for a month
    List {
        /// Month ("Jan 2025" or "2025-01"), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// List budgets for every month
        #[arg(short, long, conflicts_with = "month")]
        all: bool,
    },
    /// Edit a budget
    Edit {
        /// Budget ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FintrackResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            month,
            repeat,
        } => {
            let category = parse_category(&category)?;
            let amount = parse_amount(&amount)?;
            let start = parse_optional_month(month)?.unwrap_or_else(Month::current);

            // Stops at the first failure; earlier months stay created
            for month in Month::upcoming(repeat.max(1), start) {
                let budget = service.create(CreateBudgetInput {
                    category,
                    month,
                    amount,
                })?;

                println!("Budget added:");
                print!("{}", format_budget_details(&budget, symbol));
            }
        }

        BudgetCommands::List { month, all } => {
            let month = if all {
                None
            } else {
                Some(parse_optional_month(month)?.unwrap_or_else(Month::current))
            };

            if let Some(m) = month {
                println!("Budgets for {}", m.long_name());
            }
            print!("{}", format_budget_list(&service.list(month)?, symbol));
        }

        BudgetCommands::Edit {
            id,
            amount,
            category,
            month,
        } => {
            let budget = service.require(&id)?;

            let changes = UpdateBudgetInput {
                category: category.as_deref().map(parse_category).transpose()?,
                month: month.as_deref().map(parse_month).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
            };

            if changes.category.is_none() && changes.month.is_none() && changes.amount.is_none() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(budget.id, changes)?;
            println!("Budget updated:");
            print!("{}", format_budget_details(&updated, symbol));
        }

        BudgetCommands::Delete { id, force } => {
            let budget = service.require(&id)?;

            if !force {
                println!("About to delete budget:");
                print!("{}", format_budget_details(&budget, symbol));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(budget.id)?;
            println!("Budget deleted: {}", deleted);
        }
    }

    Ok(())
}
