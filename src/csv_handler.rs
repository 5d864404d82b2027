//! CSV file handling module for csvrel
//!
//! This module turns delimited text files into in-memory tables. It provides functionality for:
//!
//! - Loading files whose first row names the fields
//! - Parsing file specifications in the format [table_name=]file_path
//! - A configurable single-byte field separator (comma by default)
//! - Short rows, which load as records missing their trailing fields
//!
//! Every value is kept as the string found in the file; numeric
//! interpretation is left to the table operations.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{CsvrelError, CsvrelResult};
use crate::table::{Record, Table};

/// Handles loading and saving CSV files
#[derive(Debug, Clone)]
pub struct CsvHandler {
    /// Field separator byte
    delimiter: u8,
}

impl CsvHandler {
    /// Create a new CsvHandler
    ///
    /// # Arguments
    /// * `field_separator` - Separator byte; `None` means comma
    ///
    /// # Example
    /// ```
    /// # use csvrel::csv_handler::CsvHandler;
    /// let handler = CsvHandler::new(None);
    /// let tabs = CsvHandler::new(Some(b'\t'));
    /// ```
    pub fn new(field_separator: Option<u8>) -> Self {
        CsvHandler {
            delimiter: field_separator.unwrap_or(b','),
        }
    }

    /// Load a CSV file into an in-memory table
    ///
    /// # Arguments
    /// * `file_spec` - File specification in the format `[table_name=]file_path`
    ///                 If table_name is not specified, the file name without extension is used.
    ///
    /// # Returns
    /// * `Ok(Table)` with one record per data row
    /// * `Err` if the file spec is invalid, the file can't be opened, or a row can't be parsed
    ///
    /// # Example
    /// ```no_run
    /// # use csvrel::csv_handler::CsvHandler;
    /// # use csvrel::error::CsvrelResult;
    /// # fn example() -> CsvrelResult<()> {
    /// let handler = CsvHandler::new(None);
    /// // Table named "cities"
    /// let cities = handler.load_csv("data/cities.csv")?;
    /// // Table named "towns"
    /// let towns = handler.load_csv("towns=data/cities.csv")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_csv(&self, file_spec: &str) -> CsvrelResult<Table> {
        let (table_name, file_path) = parse_file_spec(file_spec)?;

        debug!(table = %table_name, path = %file_path.display(), "loading table");

        let file = File::open(&file_path)?;
        self.load_from_reader(&table_name, BufReader::new(file))
    }

    /// Load delimited text from any reader into a table
    ///
    /// The first row is the header; each following row becomes a record
    /// keyed by those header names, in header order. A row shorter than the
    /// header yields a record without the trailing fields; cells past the
    /// last header are dropped.
    pub fn load_from_reader<R: Read>(&self, table_name: &str, reader: R) -> CsvrelResult<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            if record.len() != headers.len() {
                warn!(
                    table = %table_name,
                    line = record.position().map(|p| p.line()).unwrap_or(0),
                    fields = record.len(),
                    expected = headers.len(),
                    "row length differs from header"
                );
            }

            let row: Record = headers
                .iter()
                .zip(record.iter())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            rows.push(row);
        }

        debug!(table = %table_name, rows = rows.len(), "table loaded");

        Ok(Table::new(table_name, rows))
    }
}

impl Default for CsvHandler {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Parse a file specification into table name and file path
///
/// Handles two formats:
/// 1. `table_name=file_path` - Explicit table name and file path
/// 2. `file_path` - Table name derived from file name
///
/// # Returns
/// * `Ok((String, PathBuf))` - Tuple of (table_name, file_path)
/// * `Err` - If the file specification is invalid
pub fn parse_file_spec(file_spec: &str) -> CsvrelResult<(String, PathBuf)> {
    if let Some((table_name, file_path)) = file_spec.split_once('=') {
        if table_name.is_empty() || file_path.is_empty() {
            return Err(CsvrelError::InvalidFileSpec(file_spec.to_string()));
        }
        Ok((table_name.to_string(), PathBuf::from(file_path)))
    } else {
        let path = PathBuf::from(file_spec);
        let stem = path
            .file_stem()
            .ok_or_else(|| CsvrelError::InvalidFileSpec(file_spec.to_string()))?;

        Ok((stem.to_string_lossy().to_string(), path))
    }
}

/// Parse a field separator given on the command line
///
/// Accepts a single byte, or the escape `\t` for tab.
pub fn parse_separator(separator: &str) -> CsvrelResult<u8> {
    match separator {
        "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 => Ok(s.as_bytes()[0]),
        _ => Err(CsvrelError::InvalidSeparator(separator.to_string())),
    }
}
