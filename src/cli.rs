//! CLI argument parsing module for csvrel
//!
//! This module handles parsing command-line arguments using the clap crate.
//! The tool takes the city and country files to load plus a few knobs for
//! the report it prints.

use anyhow::Result;
use clap::Parser;

/// Command-line arguments for csvrel
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Answer fixed questions about cities and countries stored in CSV files"
)]
pub struct CsvrelArgs {
    /// Input files to process - format: [table_name=]file_path
    ///
    /// If no table name is specified, the base filename (without extension)
    /// is used. The report expects tables named `cities` and `countries`.
    /// Example: cities=data/Cities.csv countries=data/Countries.csv
    #[clap(
        required = true,
        help = "Input files to load as [table_name=]file_path"
    )]
    pub files: Vec<String>,

    /// Specify field separator character
    ///
    /// Default is a comma. Use -F\\t for tab-separated files.
    #[clap(short = 'F', help = "Field separator character")]
    pub field_separator: Option<String>,

    /// Country whose mean city temperature is reported
    #[clap(long, default_value = crate::config::DEFAULT_COUNTRY, help = "Country for the mean temperature question")]
    pub country: String,

    /// Cities colder than this (strictly) count as cold
    #[clap(long, default_value_t = crate::config::DEFAULT_COLD_THRESHOLD, help = "Temperature threshold for cold cities")]
    pub cold_threshold: f64,

    /// Enable verbose diagnostic output
    ///
    /// When enabled, debug-level logs about table loading and each
    /// question are written to stderr.
    #[clap(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Parse command-line arguments into the CsvrelArgs structure
pub fn parse_args() -> Result<CsvrelArgs> {
    Ok(CsvrelArgs::parse())
}
