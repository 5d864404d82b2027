//! csvrel - answer fixed questions about cities and countries in CSV files
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments
//! 2. Load each file into an in-memory table and register it in a database
//! 3. Run the report against the database
//! 4. Print the answers to stdout

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use csvrel::cli;
use csvrel::config::AppConfig;
use csvrel::csv_handler::CsvHandler;
use csvrel::database::Database;
use csvrel::report;

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set. Otherwise verbose mode shows debug output and
/// the default is warnings and errors only.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main entry point for the csvrel utility
fn main() -> Result<()> {
    let args = cli::parse_args()?;
    let config = AppConfig::from_args(&args).context("Invalid command-line options")?;

    init_logging(config.verbose());
    debug!(?args, "parsed arguments");

    let handler = CsvHandler::new(config.field_separator());
    let mut database = Database::new();

    for file_spec in &args.files {
        let table = handler
            .load_csv(file_spec)
            .with_context(|| format!("Failed to load file: {file_spec}"))?;
        debug!(table = table.name(), rows = table.row_count(), "registered table");
        database.insert(table);
    }

    debug!(
        count = database.table_count(),
        names = ?database.table_names(),
        "tables loaded"
    );

    let report = report::run(&database, &config).context("Failed to run report")?;
    print!("{report}");

    Ok(())
}
