use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expenses::cli::{
    default_export_path, handle_add, handle_delete, handle_export, handle_history, handle_list,
    handle_months, CliContext,
};
use expenses::config::logging::init_logging;
use expenses::config::paths::{ExpensePaths, DATA_DIR_ENV};
use expenses::config::settings::{Settings, StorageLayout};
use expenses::export::ExportFormat;
use expenses::models::{ExpenseId, FormInput, MonthKey};
use expenses::tui::run_tui;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Month-by-month expense tracker for the terminal",
    long_about = "Records purchases into one SQLite database per calendar month. \
                  Run without a subcommand to open the interactive interface."
)]
struct Cli {
    /// Base directory for databases, settings and logs
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Keep every month in one database file instead of one file per month
    #[arg(long, global = true)]
    single_file: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui {
        /// Month to open (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month)]
        month: Option<MonthKey>,
    },

    /// List a month's expenses
    #[command(alias = "ls")]
    List {
        /// Month to show (YYYY-MM)
        #[arg(short, long, value_parser = parse_month)]
        month: Option<MonthKey>,
    },

    /// Add an expense
    Add {
        /// What was bought
        item: String,
        /// Number of items
        #[arg(allow_hyphen_values = true)]
        count: String,
        /// Total cost
        #[arg(allow_hyphen_values = true)]
        cost: String,
        /// Free-form details
        #[arg(short, long, default_value = "")]
        note: String,
        /// Month to add to (YYYY-MM)
        #[arg(short, long, value_parser = parse_month)]
        month: Option<MonthKey>,
    },

    /// Delete expenses by id
    #[command(alias = "rm")]
    Delete {
        /// Expense ids
        #[arg(required = true)]
        ids: Vec<ExpenseId>,
        /// Month to delete from (YYYY-MM)
        #[arg(short, long, value_parser = parse_month)]
        month: Option<MonthKey>,
    },

    /// List months that have a database
    Months,

    /// Export a month's expenses
    Export {
        /// Month to export (YYYY-MM)
        #[arg(short, long, value_parser = parse_month)]
        month: Option<MonthKey>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long, conflicts_with = "save")]
        output: Option<PathBuf>,
        /// Write to the exports directory under a name derived from the month
        #[arg(long)]
        save: bool,
    },

    /// Show recent inserts and deletes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn parse_month(s: &str) -> Result<MonthKey, String> {
    MonthKey::parse(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => ExpensePaths::with_base_dir(dir),
        None => ExpensePaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;
    if cli.single_file {
        settings.storage_layout = StorageLayout::Single;
    }

    init_logging(&paths, &settings)?;

    let ctx = CliContext::new(paths, settings)?;

    match cli.command {
        None => run_tui(&ctx.store, &ctx.settings, ctx.audit_logger(), MonthKey::current())?,
        Some(Commands::Tui { month }) => {
            let month = month.unwrap_or_else(MonthKey::current);
            run_tui(&ctx.store, &ctx.settings, ctx.audit_logger(), month)?;
        }
        Some(Commands::List { month }) => {
            handle_list(&ctx, month.unwrap_or_else(MonthKey::current))?;
        }
        Some(Commands::Add {
            item,
            count,
            cost,
            note,
            month,
        }) => {
            let input = FormInput::new(item, count, note, cost);
            handle_add(&ctx, month.unwrap_or_else(MonthKey::current), input)?;
        }
        Some(Commands::Delete { ids, month }) => {
            handle_delete(&ctx, month.unwrap_or_else(MonthKey::current), &ids)?;
        }
        Some(Commands::Months) => {
            handle_months(&ctx)?;
        }
        Some(Commands::Export {
            month,
            format,
            output,
            save,
        }) => {
            let month = month.unwrap_or_else(MonthKey::current);
            let output = if save {
                Some(default_export_path(&ctx, month, format))
            } else {
                output
            };
            handle_export(&ctx, month, format, output)?;
        }
        Some(Commands::History { limit }) => {
            handle_history(&ctx, limit)?;
        }
        Some(Commands::Config) => {
            let paths = &ctx.paths;
            let settings = &ctx.settings;
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Diagnostic log:   {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Storage layout:  {:?}", settings.storage_layout);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Log level:       {}", settings.log_level);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
    }

    Ok(())
}
