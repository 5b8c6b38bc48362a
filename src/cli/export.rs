//! CLI commands for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use super::parse_optional_month;
use crate::error::{FintrackError, FintrackResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (everything, re-importable)
    Json,
    /// YAML format (everything, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all transactions and budgets
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export transactions to CSV
    Transactions {
        /// Output file path
        output: PathBuf,
    },

    /// Export budgets to CSV
    Budgets {
        /// Output file path
        output: PathBuf,

        /// Only budgets for this month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FintrackResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => json::export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
            }
            finish(writer)?;
            println!("All data exported to: {}", output.display());
        }

        ExportCommands::Transactions { output } => {
            let mut writer = create_output(&output)?;
            let count = csv::export_transactions_csv(storage, &mut writer)?;
            finish(writer)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }

        ExportCommands::Budgets { output, month } => {
            let month = parse_optional_month(month)?;
            let mut writer = create_output(&output)?;
            let count = csv::export_budgets_csv(storage, &mut writer, month)?;
            finish(writer)?;
            println!("Exported {} budgets to: {}", count, output.display());
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> FintrackResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        FintrackError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>) -> FintrackResult<()> {
    writer
        .flush()
        .map_err(|e| FintrackError::Export(e.to_string()))
}
