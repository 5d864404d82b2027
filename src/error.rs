//! Error handling for csvrel
//!
//! This module defines the error type shared by the table core, the CSV
//! loader and the report layer. Nothing in the core recovers from an error:
//! every failure is returned to the caller with `?`.
//!
//! The module uses thiserror to minimize boilerplate code.

use thiserror::Error;

/// CsvrelError represents all possible errors that can occur in csvrel
///
/// The variants fall into two groups:
/// - loader failures (I/O, CSV parsing, bad file specifications)
/// - query failures raised while joining, filtering or aggregating rows
#[derive(Error, Debug)]
pub enum CsvrelError {
    /// Error during file system operations (reading/writing files)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while parsing or writing delimited file data
    #[error("File parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error for invalid file=table specifications
    #[error("Invalid file specification: {0}")]
    InvalidFileSpec(String),

    /// Error for a field separator that isn't a single byte
    #[error("Invalid field separator: '{0}'")]
    InvalidSeparator(String),

    /// Error when a referenced table doesn't exist
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    /// A record has no field with the requested name
    #[error("Field '{key}' not found in record")]
    KeyLookup { key: String },

    /// A field value could not be read as a floating point number
    #[error("Field '{key}' has non-numeric value '{value}'")]
    NumericParse { key: String, value: String },

    /// A reducer that needs at least one value was given none
    #[error("Aggregate over an empty set of values")]
    EmptyAggregate,
}

/// Result type alias for operations that can produce a CsvrelError
pub type CsvrelResult<T> = std::result::Result<T, CsvrelError>;
