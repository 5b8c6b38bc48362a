//! CLI commands for importing data
//!
//! CSV import adds transactions; JSON import restores a full export and
//! replaces everything.

use std::fs::{self, File};
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{FintrackError, FintrackResult};
use crate::export::import_from_json;
use crate::services::ImportService;
use crate::storage::Storage;

/// Import subcommands
#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Import transactions from a CSV file
    ///
    /// The header row must name date, description, amount and category
    /// columns; a type column is optional (the amount's sign decides).
    Csv {
        /// Path to CSV file
        file: PathBuf,

        /// Show what would be imported without saving anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Restore a full JSON export, replacing all current data
    Json {
        /// Path to JSON export
        file: PathBuf,

        /// Confirm that existing transactions and budgets are replaced
        #[arg(long)]
        replace: bool,
    },
}

/// Handle import commands
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ImportCommands,
) -> FintrackResult<()> {
    match cmd {
        ImportCommands::Csv { file, dry_run } => {
            let reader = File::open(&file).map_err(|e| {
                FintrackError::Import(format!("Failed to open {}: {}", file.display(), e))
            })?;

            let summary = ImportService::new(storage).import_csv(reader, dry_run)?;

            if dry_run {
                println!("Import Preview for '{}'", file.display());
            } else {
                println!("Import Complete for '{}'", file.display());
            }
            println!("{}", "=".repeat(40));
            println!(
                "  {:<18}{}",
                if dry_run { "Would import:" } else { "Imported:" },
                summary.imported_count()
            );
            println!("  {:<18}{}", "Duplicates (skip):", summary.duplicates_skipped);
            println!("  {:<18}{}", "Errors:", summary.errors.len());

            for txn in summary.imported.iter().take(5) {
                println!(
                    "    {} {} {} {}",
                    txn.date,
                    txn.kind,
                    txn.amount.format_grouped(&settings.currency_symbol),
                    txn.description
                );
            }
            if summary.imported_count() > 5 {
                println!("    ... and {} more", summary.imported_count() - 5);
            }

            for error in &summary.errors {
                println!("  Line {}: {}", error.line, error.message);
            }
        }

        ImportCommands::Json { file, replace } => {
            let content = fs::read_to_string(&file).map_err(|e| {
                FintrackError::Import(format!("Failed to read {}: {}", file.display(), e))
            })?;
            let export = import_from_json(&content)?;

            if !replace {
                println!(
                    "{} contains {} transactions and {} budgets.",
                    file.display(),
                    export.transactions.len(),
                    export.budgets.len()
                );
                println!(
                    "Importing replaces the current {} transactions and {} budgets.",
                    storage.transactions.count()?,
                    storage.budgets.count()?
                );
                println!("Use --replace to confirm");
                return Ok(());
            }

            let (txn_count, budget_count) = (export.transactions.len(), export.budgets.len());
            storage.replace_all(export.transactions, export.budgets)?;
            println!(
                "Restored {} transactions and {} budgets from {}",
                txn_count,
                budget_count,
                file.display()
            );
        }
    }

    Ok(())
}
