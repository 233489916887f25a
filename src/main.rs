use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use finledger::cli::{handle_analytics, handle_check, handle_convert, handle_summary};
use finledger::cli::{FormatArg, ReportKind};
use finledger::config::{paths::LedgerPaths, settings::Settings};
use finledger::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "finledger",
    version,
    about = "Personal finance ledger: balances, integrity checks and analytics",
    long_about = "finledger reads ledger snapshots (JSON, CSV or YAML), checks that \
                  every account balance matches its operations, prints income and \
                  expense analytics and converts between file formats."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print accounts, totals and the income/expense summary
    Summary {
        /// Ledger file (.json, .csv, .yaml)
        file: PathBuf,
    },

    /// Print an analytics report
    Analytics {
        /// Ledger file (.json, .csv, .yaml)
        file: PathBuf,
        /// Report kind
        #[arg(short, long, value_enum, default_value = "full")]
        kind: ReportKind,
        /// First day of the period (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day of the period (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Number of categories in a top report
        #[arg(long)]
        top: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that every balance matches its operations
    Check {
        /// Ledger file (.json, .csv, .yaml)
        file: PathBuf,
        /// Recalculate balances and write the repaired ledger
        #[arg(long)]
        repair: bool,
        /// Where to write the repaired ledger
        #[arg(short, long, requires = "repair")]
        output: Option<PathBuf>,
    },

    /// Read a ledger file and write it in another format
    Convert {
        /// Source ledger file
        input: PathBuf,
        /// Destination file
        output: PathBuf,
        /// Output format (defaults to the output extension)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level);

    match cli.command {
        Some(Commands::Summary { file }) => {
            handle_summary(&file, &settings)?;
        }
        Some(Commands::Analytics {
            file,
            kind,
            from,
            to,
            top,
            json,
        }) => {
            let kind = kind.to_kind(from, to, top, &settings);
            handle_analytics(&file, &settings, kind, json)?;
        }
        Some(Commands::Check {
            file,
            repair,
            output,
        }) => {
            if !handle_check(&file, &paths, &settings, repair, output)? {
                std::process::exit(1);
            }
        }
        Some(Commands::Convert {
            input,
            output,
            format,
        }) => {
            handle_convert(&input, &output, format.map(Into::into), &settings)?;
        }
        Some(Commands::Config) => {
            println!("finledger Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Export directory: {}", paths.exports_dir().display());
            println!();
            println!("Settings:");
            println!("  Default format:    {}", settings.default_format);
            println!("  Top expense count: {}", settings.top_expense_count);
            println!("  Log level:         {}", settings.log_level);
            println!("  Currency symbol:   {}", settings.currency_symbol);
        }
        None => {
            println!("finledger - personal finance ledger");
            println!();
            println!("Run 'finledger --help' for usage information.");
        }
    }

    Ok(())
}
