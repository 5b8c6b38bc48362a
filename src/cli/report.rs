//! CLI commands for reports
//!
//! Prints each report to the terminal or exports it to CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use super::parse_optional_month;
use crate::config::Settings;
use crate::error::{FintrackError, FintrackResult};
use crate::models::Month;
use crate::reports::{
    BudgetComparisonReport, CategoryBreakdownReport, InsightsReport, MonthlyBudgetReport,
    MonthlyReport, Overview,
};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Total income, expenses and balance
    Overview,

    /// Income and expenses per month
    Monthly {
        /// Only the most recent N months with data
        #[arg(short, long)]
        last: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expense breakdown by category
    #[command(alias = "spending")]
    Categories {
        /// Restrict to one month ("Jan 2025" or "2025-01"); all time otherwise
        #[arg(short, long)]
        month: Option<String>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budget vs actual spending for a month
    Budget {
        /// Month ("Jan 2025" or "2025-01"), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budgeted vs spent for every budgeted month
    MonthlyBudget {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Spending insights
    Insights,
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FintrackResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Overview => {
            println!("{}", Overview::generate(storage)?.format_terminal(symbol));
        }

        ReportCommands::Monthly { last, output } => {
            let mut report = MonthlyReport::generate(storage)?;
            if let Some(count) = last {
                report.rows = report.last(count).to_vec();
            }
            match output {
                Some(path) => write_csv(&path, |w| report.export_csv(w))?,
                None => println!("{}", report.format_terminal(symbol)),
            }
        }

        ReportCommands::Categories { month, top, output } => {
            let mut report = CategoryBreakdownReport::generate(storage, parse_optional_month(month)?)?;
            if let Some(count) = top {
                report.rows.truncate(count);
            }
            match output {
                Some(path) => write_csv(&path, |w| report.export_csv(w))?,
                None => println!("{}", report.format_terminal(symbol)),
            }
        }

        ReportCommands::Budget { month, output } => {
            let month = parse_optional_month(month)?.unwrap_or_else(Month::current);
            let report = BudgetComparisonReport::generate(storage, month)?;
            match output {
                Some(path) => write_csv(&path, |w| report.export_csv(w))?,
                None => println!("{}", report.format_terminal(symbol)),
            }
        }

        ReportCommands::MonthlyBudget { output } => {
            let report = MonthlyBudgetReport::generate(storage)?;
            match output {
                Some(path) => write_csv(&path, |w| report.export_csv(w))?,
                None => println!("{}", report.format_terminal(symbol)),
            }
        }

        ReportCommands::Insights => {
            let report = InsightsReport::generate(
                storage,
                chrono::Local::now().date_naive(),
                settings.insight_threshold_percent,
                symbol,
            )?;
            println!("{}", report.format_terminal());
        }
    }

    Ok(())
}

fn write_csv<F>(path: &Path, export: F) -> FintrackResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> FintrackResult<()>,
{
    let file = File::create(path).map_err(|e| {
        FintrackError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export(&mut writer)?;
    writer
        .flush()
        .map_err(|e| FintrackError::Export(e.to_string()))?;

    println!("Report exported to: {}", path.display());
    Ok(())
}
