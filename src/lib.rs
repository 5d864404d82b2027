//! csvrel library crate
//!
//! A small in-memory relational toolkit. Tables are named lists of records
//! (field name to string value) loaded from delimited files; a `Database`
//! keeps them by name. Questions are answered by chaining the table
//! operations:
//!
//! - `Table::join` - nested-loop equi-join on a shared field
//! - `Table::filter` - keep rows accepted by a predicate
//! - `Table::select` - per-row projection onto a list of attributes
//! - `Table::aggregate` - reduce a numeric field with SUM, AVG, MIN, MAX, ...
//!
//! There is no query planner, no index and no persistence. Every operation
//! is a linear or quadratic pass over the rows.
//!
//! ```
//! use csvrel::aggregate::mean;
//! use csvrel::csv_handler::CsvHandler;
//! use csvrel::database::Database;
//! use csvrel::table::field;
//!
//! # fn main() -> csvrel::error::CsvrelResult<()> {
//! let csv = "city,country,temperature\nRome,Italy,25\nTurin,Italy,15\n";
//! let mut db = Database::new();
//! db.insert(CsvHandler::default().load_from_reader("cities", csv.as_bytes())?);
//!
//! let cities = db.search("cities").expect("cities was inserted");
//! let italy = cities.filter(|r| Ok(field(r, "country")? == "Italy"))?;
//! assert_eq!(italy.aggregate(mean, "temperature")?, 20.0);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod csv_handler;
pub mod database;
pub mod error;
pub mod report;
pub mod table;
