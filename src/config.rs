//! Configuration module for csvrel
//!
//! This module provides a centralized configuration structure for the application.
//! It is built once from the command line and passed down by reference rather
//! than using global state or passing individual settings.

use crate::cli::CsvrelArgs;
use crate::csv_handler::parse_separator;
use crate::error::CsvrelResult;

/// Country used by the mean temperature question when none is given
pub const DEFAULT_COUNTRY: &str = "Italy";

/// Temperature below which a city counts as cold
pub const DEFAULT_COLD_THRESHOLD: f64 = 5.0;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether to show verbose output
    verbose: bool,

    /// Field separator byte for input files, comma when unset
    field_separator: Option<u8>,

    /// Country whose mean city temperature is reported
    country: String,

    /// Upper bound (exclusive) for the cold city question
    cold_threshold: f64,
}

impl AppConfig {
    /// Create a new application configuration
    ///
    /// # Arguments
    /// * `verbose` - Whether to show verbose output
    /// * `field_separator` - Optional field separator byte
    /// * `country` - Country for the mean temperature question
    /// * `cold_threshold` - Threshold for the cold city question
    pub fn new(
        verbose: bool,
        field_separator: Option<u8>,
        country: String,
        cold_threshold: f64,
    ) -> Self {
        Self {
            verbose,
            field_separator,
            country,
            cold_threshold,
        }
    }

    /// Build the configuration from parsed command-line arguments
    ///
    /// Fails if the `-F` separator is not a single byte.
    pub fn from_args(args: &CsvrelArgs) -> CsvrelResult<Self> {
        let field_separator = args
            .field_separator
            .as_deref()
            .map(parse_separator)
            .transpose()?;

        Ok(Self::new(
            args.verbose,
            field_separator,
            args.country.clone(),
            args.cold_threshold,
        ))
    }

    /// Get the verbose flag
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Get the field separator
    pub fn field_separator(&self) -> Option<u8> {
        self.field_separator
    }

    /// Get the report country
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Get the cold city threshold
    pub fn cold_threshold(&self) -> f64 {
        self.cold_threshold
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(false, None, DEFAULT_COUNTRY.to_string(), DEFAULT_COLD_THRESHOLD)
    }
}
