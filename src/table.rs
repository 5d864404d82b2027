//! Table module for csvrel
//!
//! This module provides the in-memory table representation. A table is a
//! name plus an ordered list of records, where each record maps field names
//! to string values. There is no schema: two records in the same table may
//! carry different keys, and a missing key only becomes an error when an
//! operation actually reads it.
//!
//! The relational operations are:
//!
//! - `join` - nested-loop equi-join on a shared field
//! - `filter` - keep the rows accepted by a predicate
//! - `select` - per-row projection onto a list of attributes
//! - `aggregate` - parse a field as numbers and hand them to a reducer
//!
//! None of them mutate `self`; `join` and `filter` build new tables.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{CsvrelError, CsvrelResult};

/// A single row: field name to string value, in insertion order
pub type Record = IndexMap<String, String>;

/// Get a field from a record as a string slice
///
/// # Returns
/// * `Ok(&str)` with the field value
/// * `Err(KeyLookup)` if the record has no such field
pub fn field<'a>(record: &'a Record, key: &str) -> CsvrelResult<&'a str> {
    record
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| CsvrelError::KeyLookup {
            key: key.to_string(),
        })
}

/// Get a field from a record parsed as a floating point number
///
/// Surrounding whitespace is ignored, so `" 25"` reads as `25.0`. Parsing is
/// Rust's `f64` grammar: digit separators such as `1_000` are rejected.
///
/// # Returns
/// * `Ok(f64)` with the parsed value
/// * `Err(KeyLookup)` if the record has no such field
/// * `Err(NumericParse)` if the value is not a number
pub fn number(record: &Record, key: &str) -> CsvrelResult<f64> {
    let raw = field(record, key)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CsvrelError::NumericParse {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

/// Represents an in-memory table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Name of the table
    name: String,

    /// Rows of data, in load order
    rows: Vec<Record>,
}

impl Table {
    /// Create a new table with the given name and rows
    pub fn new(name: &str, rows: Vec<Record>) -> Self {
        Table {
            name: name.to_string(),
            rows,
        }
    }

    /// Get the name of the table
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the rows of the table
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Get the row count
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Equi-join this table with another on a shared field
    ///
    /// Every row of `self` is compared with every row of `other`; when both
    /// hold the same string under `common_key`, the output gets a copy of the
    /// left row extended with the right row. On a key collision the right
    /// row's value wins.
    ///
    /// Output rows come out in row-major order: all matches for the first
    /// left row (in `other`'s order), then the second left row, and so on.
    /// The result is named `<self>_joins_<other>`.
    ///
    /// # Arguments
    /// * `other` - The right-hand table
    /// * `common_key` - Field compared on both sides
    ///
    /// # Returns
    /// * `Ok(Table)` with the matching pairs merged
    /// * `Err(KeyLookup)` if a compared row lacks `common_key`
    pub fn join(&self, other: &Table, common_key: &str) -> CsvrelResult<Table> {
        let mut joined = Table::new(&format!("{}_joins_{}", self.name, other.name), Vec::new());

        // Nothing gets compared against an empty right side
        if other.is_empty() {
            return Ok(joined);
        }

        for left_row in &self.rows {
            let left_value = field(left_row, common_key)?;

            for right_row in &other.rows {
                if left_value == field(right_row, common_key)? {
                    joined.rows.push(merge_records(left_row, right_row));
                }
            }
        }

        Ok(joined)
    }

    /// Create a new table with the rows accepted by a predicate
    ///
    /// Rows keep their original order and the result is named
    /// `<self>_filtered`. An error returned by the predicate stops the scan
    /// and is passed back unchanged.
    ///
    /// # Arguments
    /// * `predicate` - Called once per row; `Ok(true)` keeps the row
    pub fn filter<F>(&self, predicate: F) -> CsvrelResult<Table>
    where
        F: Fn(&Record) -> CsvrelResult<bool>,
    {
        let mut filtered = Table::new(&format!("{}_filtered", self.name), Vec::new());

        for row in &self.rows {
            if predicate(row)? {
                filtered.rows.push(row.clone());
            }
        }

        Ok(filtered)
    }

    /// Apply a reducer to the numeric values of one field
    ///
    /// All rows are converted before the reducer runs, so a single bad value
    /// anywhere in the table fails the whole call. The reducer decides what
    /// to do with an empty slice; the ones in `crate::aggregate` return
    /// `EmptyAggregate` when they need at least one value.
    ///
    /// # Arguments
    /// * `func` - Reducer over the parsed values
    /// * `key` - Field to read from every row
    ///
    /// # Returns
    /// * whatever `func` returns
    /// * `Err(KeyLookup)` / `Err(NumericParse)` if a row cannot be converted
    pub fn aggregate<F, T>(&self, func: F, key: &str) -> CsvrelResult<T>
    where
        F: FnOnce(&[f64]) -> CsvrelResult<T>,
    {
        let values = self
            .rows
            .iter()
            .map(|row| number(row, key))
            .collect::<CsvrelResult<Vec<f64>>>()?;

        func(&values)
    }

    /// Project every row onto a list of attributes
    ///
    /// Each output record holds the keys of its row that appear in
    /// `attributes`, in the row's own key order. A key missing from a row is
    /// simply left out of that row's output. Unlike `join` and `filter` this
    /// returns bare records rather than a table.
    pub fn select(&self, attributes: &[&str]) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter(|(key, _)| attributes.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .collect()
    }
}

/// Copy `left` and overlay `right` onto it
fn merge_records(left: &Record, right: &Record) -> Record {
    let mut merged = left.clone();
    for (key, value) in right {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Renders as `name:[{k: v, ...}, ...]`
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:[", self.name)?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{{")?;
            for (j, (key, value)) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "'{}': '{}'", key, value)?;
            }
            write!(f, "}}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{max, mean, min, sum};

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn cities() -> Table {
        Table::new(
            "cities",
            vec![
                record(&[("city", "Rome"), ("country", "Italy"), ("temperature", "25")]),
                record(&[("city", "Turin"), ("country", "Italy"), ("temperature", "15")]),
                record(&[("city", "Oslo"), ("country", "Norway"), ("temperature", "2")]),
                record(&[("city", "Atlantis"), ("country", "Nowhere"), ("temperature", "30")]),
            ],
        )
    }

    fn countries() -> Table {
        Table::new(
            "countries",
            vec![
                record(&[("country", "Italy"), ("EU", "yes"), ("coastline", "yes")]),
                record(&[("country", "Norway"), ("EU", "no"), ("coastline", "yes")]),
            ],
        )
    }

    #[test]
    fn test_italy_mean_temperature() {
        let italy = cities()
            .filter(|r| Ok(field(r, "country")? == "Italy"))
            .unwrap();

        let avg = italy.aggregate(mean, "temperature").unwrap();
        assert!((avg - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_join_merges_fields() {
        let joined = cities().join(&countries(), "country").unwrap();

        assert_eq!(joined.name(), "cities_joins_countries");
        // Atlantis has no matching country
        assert_eq!(joined.row_count(), 3);
        for row in joined.rows() {
            assert_eq!(row.len(), 5);
            assert_ne!(row["city"], "Atlantis");
        }
        assert_eq!(joined.rows()[0]["city"], "Rome");
        assert_eq!(joined.rows()[2]["EU"], "no");
    }

    #[test]
    fn test_join_cardinality_and_right_wins() {
        let left = Table::new(
            "l",
            vec![
                record(&[("k", "1"), ("v", "left-a")]),
                record(&[("k", "2"), ("v", "left-b")]),
            ],
        );
        let right = Table::new(
            "r",
            vec![
                record(&[("k", "1"), ("v", "right-x")]),
                record(&[("k", "1"), ("v", "right-y")]),
                record(&[("k", "3"), ("v", "right-z")]),
            ],
        );

        let joined = left.join(&right, "k").unwrap();
        assert_eq!(joined.row_count(), 2);
        assert_eq!(joined.rows()[0]["v"], "right-x");
        assert_eq!(joined.rows()[1]["v"], "right-y");
        // key order: left keys first
        let keys: Vec<&str> = joined.rows()[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["k", "v"]);
    }

    #[test]
    fn test_join_missing_key() {
        let left = Table::new("l", vec![record(&[("id", "1")])]);
        let result = left.join(&countries(), "country");
        assert!(matches!(result, Err(CsvrelError::KeyLookup { key }) if key == "country"));
    }

    #[test]
    fn test_join_missing_key_on_right() {
        let left = Table::new("l", vec![record(&[("country", "Italy")])]);
        let right = Table::new(
            "r",
            vec![
                record(&[("country", "Italy"), ("EU", "yes")]),
                record(&[("EU", "no")]),
            ],
        );
        let result = left.join(&right, "country");
        assert!(matches!(result, Err(CsvrelError::KeyLookup { key }) if key == "country"));
    }

    #[test]
    fn test_join_empty_right_side() {
        let left = Table::new("l", vec![record(&[("id", "1")])]);
        let right = Table::new("r", Vec::new());
        let joined = left.join(&right, "country").unwrap();
        assert!(joined.is_empty());
        assert_eq!(joined.name(), "l_joins_r");
    }

    #[test]
    fn test_filter_identity() {
        let table = cities();
        let filtered = table.filter(|_| Ok(true)).unwrap();
        assert_eq!(filtered.name(), "cities_filtered");
        assert_eq!(filtered.rows(), table.rows());
    }

    #[test]
    fn test_filter_chain_is_conjunction() {
        let table = cities();
        let chained = table
            .filter(|r| Ok(field(r, "country")? == "Italy"))
            .unwrap()
            .filter(|r| Ok(number(r, "temperature")? > 20.0))
            .unwrap();
        let combined = table
            .filter(|r| Ok(field(r, "country")? == "Italy" && number(r, "temperature")? > 20.0))
            .unwrap();

        assert_eq!(chained.rows(), combined.rows());
        assert_eq!(chained.row_count(), 1);
        assert_eq!(chained.name(), "cities_filtered_filtered");
    }

    #[test]
    fn test_filter_propagates_predicate_error() {
        let result = cities().filter(|r| Ok(field(r, "population")? == "1"));
        assert!(matches!(result, Err(CsvrelError::KeyLookup { .. })));
    }

    #[test]
    fn test_select_omits_missing_keys() {
        let table = Table::new(
            "mixed",
            vec![
                record(&[("city", "Rome"), ("latitude", "41.9"), ("country", "Italy")]),
                record(&[("city", "Nowhere")]),
            ],
        );

        let selected = table.select(&["city", "latitude", "altitude"]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0], record(&[("city", "Rome"), ("latitude", "41.9")]));
        assert_eq!(selected[1], record(&[("city", "Nowhere")]));
        assert!(!selected[1].contains_key("altitude"));
    }

    #[test]
    fn test_aggregate_sum_max_min() {
        let table = cities();
        assert_eq!(table.aggregate(sum, "temperature").unwrap(), 72.0);
        assert_eq!(table.aggregate(max, "temperature").unwrap(), 30.0);
        assert_eq!(table.aggregate(min, "temperature").unwrap(), 2.0);
    }

    #[test]
    fn test_aggregate_with_closure() {
        let count = cities()
            .aggregate(|xs| Ok(xs.iter().filter(|x| **x > 10.0).count()), "temperature")
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_aggregate_non_numeric() {
        let result = cities().aggregate(sum, "city");
        match result {
            Err(CsvrelError::NumericParse { key, value }) => {
                assert_eq!(key, "city");
                assert_eq!(value, "Rome");
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_converts_every_row() {
        let table = Table::new(
            "t",
            vec![
                record(&[("v", "1")]),
                record(&[("v", "2")]),
                record(&[("v", "x")]),
            ],
        );

        // the reducer never looks at the values, yet the bad last row fails the call
        let result = table.aggregate(|_| Ok(0), "v");
        match result {
            Err(CsvrelError::NumericParse { key, value }) => {
                assert_eq!(key, "v");
                assert_eq!(value, "x");
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_empty_table() {
        let empty = cities()
            .filter(|r| Ok(field(r, "country")? == "France"))
            .unwrap();
        assert!(matches!(
            empty.aggregate(max, "temperature"),
            Err(CsvrelError::EmptyAggregate)
        ));
        assert_eq!(empty.aggregate(sum, "temperature").unwrap(), 0.0);
    }

    #[test]
    fn test_display() {
        let table = Table::new("t", vec![record(&[("a", "1"), ("b", "x")])]);
        assert_eq!(table.to_string(), "t:[{'a': '1', 'b': 'x'}]");
    }
}
