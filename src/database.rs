//! Database module for csvrel
//!
//! This module provides the registry that owns every loaded table. Tables
//! are kept in insertion order and looked up by a linear scan; inserting a
//! second table under an existing name is allowed, but lookups only ever
//! see the first one.

use crate::error::{CsvrelError, CsvrelResult};
use crate::table::Table;

/// Central Database that owns all tables in the system
#[derive(Debug, Default)]
pub struct Database {
    /// Tables in insertion order
    tables: Vec<Table>,
}

impl Database {
    /// Create a new empty database
    pub fn new() -> Self {
        Database { tables: Vec::new() }
    }

    /// Add a table to the database
    ///
    /// No uniqueness check is made on the table name.
    pub fn insert(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Find the first table with the given name
    ///
    /// # Returns
    /// * `Some(&Table)` for the earliest inserted table with that name
    /// * `None` if no table matches
    pub fn search(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name() == name)
    }

    /// Get a reference to a table
    ///
    /// Same lookup as `search`, for callers that want a missing table to be
    /// an error.
    ///
    /// # Returns
    /// * `Ok(&Table)` if the table exists
    /// * `Err(TableNotFound)` if it doesn't
    pub fn get_table(&self, name: &str) -> CsvrelResult<&Table> {
        self.search(name)
            .ok_or_else(|| CsvrelError::TableNotFound(name.to_string()))
    }

    /// Get all tables in insertion order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Get names of all tables in insertion order
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name().to_string()).collect()
    }

    /// Get number of tables in the database
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}
