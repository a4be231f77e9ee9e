//! Error handling for memsort
//!
//! This module defines the error type shared by the table, sort, command and
//! CSV layers. Parse errors, I/O errors and "nothing loaded" conditions are all
//! distinguishable so the menu loop can report them and keep going.

use thiserror::Error;

/// MemSortError represents all failures that can be reported to the caller
///
/// Numeric parse misses inside the comparator are deliberately absent: they
/// fall back to text comparison and never surface.
#[derive(Error, Debug)]
pub enum MemSortError {
    /// Error during file system operations (reading/writing files)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while reading or writing CSV records
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// The command does not start with `select `
    #[error("Command must start with 'select': {0}")]
    NotASelect(String),

    /// A required keyword of the select grammar is missing
    #[error("Missing '{0}' clause")]
    MissingKeyword(&'static str),

    /// The order-by clause lacks column, direction, `with` or sort name
    #[error("Incomplete ORDER BY clause: expected '<column> <ASC|DSC|DESC> with <sort>', got '{0}'")]
    IncompleteOrderBy(String),

    /// Direction token is not ASC, DSC or DESC
    #[error("Invalid sort direction '{0}': expected ASC, DSC or DESC")]
    InvalidDirection(String),

    /// A referenced column doesn't exist in the table header
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// The sort name doesn't map to one of the sort algorithms
    #[error("Unknown sort algorithm '{0}': expected bubble, insertion, merge or quick")]
    UnknownSortAlgorithm(String),

    /// A sort was requested with no columns
    #[error("At least one column is required to sort")]
    EmptyColumnList,

    /// An export was requested without a destination
    #[error("No output file given")]
    MissingOutputPath,

    /// An operation needs loaded data but the table is empty
    #[error("No table loaded")]
    NoTableLoaded,
}

/// Result type alias for operations that can produce a MemSortError
pub type MemSortResult<T> = std::result::Result<T, MemSortError>;
