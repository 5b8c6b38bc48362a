use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fintrack::cli::{
    handle_budget_command, handle_export_command, handle_import_command, handle_report_command,
    handle_transaction_command, BudgetCommands, ExportCommands, ImportCommands, ReportCommands,
    TransactionCommands,
};
use fintrack::config::{FintrackPaths, Settings};
use fintrack::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Terminal-based personal finance tracker",
    long_about = "fintrack records income and expense transactions and monthly \
                  category budgets, and shows where your money goes: monthly \
                  totals, category breakdowns, budget vs actual and spending insights."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard
    #[command(alias = "dashboard")]
    Tui,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import data
    #[command(subcommand)]
    Import(ImportCommands),

    /// Show recent changes
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Create the data directory and files
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: u8, tui: bool) {
    // The dashboard owns the terminal; stay quiet unless RUST_LOG asks otherwise
    let level = match (tui, verbose) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open(paths: &FintrackPaths) -> Result<Storage> {
    Ok(Storage::open(paths.clone())?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, matches!(cli.command, Some(Commands::Tui)));

    let paths = FintrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base = %paths.base_dir().display(), "resolved paths");

    let Some(command) = cli.command else {
        println!("fintrack - personal finance tracking");
        println!();
        println!("Run 'fintrack --help' for usage information.");
        println!("Run 'fintrack tui' to launch the dashboard.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized; nothing to do.");
            }
        }
        Commands::Config => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Audit log:         {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Insight threshold: {}%", settings.insight_threshold_percent);
            println!("  Chart months:      {}", settings.chart_months);
            println!("  Month window:      {}", settings.month_window);
        }
        Commands::Tui => fintrack::tui::run_tui(&open(&paths)?, &settings)?,
        Commands::Transaction(cmd) => handle_transaction_command(&open(&paths)?, &settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&open(&paths)?, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&open(&paths)?, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&open(&paths)?, cmd)?,
        Commands::Import(cmd) => handle_import_command(&open(&paths)?, &settings, cmd)?,
        Commands::Audit { count } => {
            let storage = open(&paths)?;
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}
