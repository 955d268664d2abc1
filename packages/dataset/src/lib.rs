#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Tabular address datasets.
//!
//! A [`Table`] holds named columns of nullable strings, loaded from and
//! written to CSV. The functions in [`ops`] apply the matching engine to
//! whole columns: pattern extraction, spelling correction, house-number
//! insertion, unique-name listing and filling missing cells from a second
//! table.

pub mod ops;
pub mod table;

pub use table::Table;

/// Errors from dataset operations.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A named column does not exist in the table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A column was added twice.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A column's length does not match the table's row count.
    #[error("Column {column} has {actual} rows, expected {expected}")]
    RowCountMismatch {
        /// The offending column.
        column: String,
        /// The table's row count.
        expected: usize,
        /// The column's row count.
        actual: usize,
    },

    /// Two paired column lists have different lengths.
    #[error("The length of target columns ({targets}) and filler columns ({fillers}) must be the same")]
    ColumnLengthMismatch {
        /// Number of target columns.
        targets: usize,
        /// Number of filler columns.
        fillers: usize,
    },

    /// CSV parsing or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Matcher construction error.
    #[error("Matching error: {0}")]
    Matching(#[from] callejero_matching::MatchingError),
}
