//! Aggregate function module for csvrel
//!
//! This module contains the reducers handed to `Table::aggregate`. They all
//! take the parsed column as a slice of `f64`. The ones that are undefined on
//! an empty slice (mean, min, max) report `EmptyAggregate` instead of
//! producing NaN or infinities.

use crate::error::{CsvrelError, CsvrelResult};

/// Sum of the values; 0.0 for an empty slice
pub fn sum(values: &[f64]) -> CsvrelResult<f64> {
    Ok(values.iter().sum())
}

/// Arithmetic mean of the values
pub fn mean(values: &[f64]) -> CsvrelResult<f64> {
    if values.is_empty() {
        return Err(CsvrelError::EmptyAggregate);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Smallest value
pub fn min(values: &[f64]) -> CsvrelResult<f64> {
    values
        .iter()
        .copied()
        .reduce(f64::min)
        .ok_or(CsvrelError::EmptyAggregate)
}

/// Largest value
pub fn max(values: &[f64]) -> CsvrelResult<f64> {
    values
        .iter()
        .copied()
        .reduce(f64::max)
        .ok_or(CsvrelError::EmptyAggregate)
}
