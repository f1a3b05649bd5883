//! Error types for classification runs
//!
//! Two tiers:
//! - `TriageError`: run-level preconditions (thresholds, schema, I/O). These
//!   abort the whole run before anything is returned.
//! - `ZoneError`: a single zone could not be classified. Other zones are
//!   unaffected and the failure is reported next to the classified zones.

use std::path::PathBuf;
use thiserror::Error;

/// Run-level failure. Nothing partially computed is returned.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Invalid classification configuration: {}", .0.join("; "))]
    Configuration(Vec<String>),

    #[error("Required column '{0}' not found in input header")]
    MissingColumn(String),

    /// `row` is the 1-based data row, header excluded
    #[error("Row {row}: missing value for required field '{field}'")]
    MissingField { row: usize, field: String },

    #[error("Row {row}: field '{field}' is not a number: '{value}'")]
    InvalidNumber {
        row: usize,
        field: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Why a single zone could not be classified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZoneError {
    #[error("data row {}: coordinates must be finite (x={}, y={})", .row + 1, .x, .y)]
    NonFiniteCoordinate { row: usize, x: f64, y: f64 },

    #[error(
        "data row {}: cumulative production must be a finite, non-negative number (got {})",
        .row + 1,
        .value
    )]
    InvalidCumulative { row: usize, value: f64 },
}
