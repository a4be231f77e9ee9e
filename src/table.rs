//! Table module for memsort
//!
//! This module provides the in-memory table representation: a header naming the
//! columns and an ordered sequence of string rows. It handles:
//!
//! - Column name resolution (case-sensitive exact match)
//! - Row storage that tolerates short or long rows
//! - In-place reordering through the sort engine
//! - Human-readable display of the loaded data

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use crate::compare::compare_rows;
use crate::error::{MemSortError, MemSortResult};
use crate::sort::{SortAlgorithm, SortSpec};

/// Represents a row in a table
///
/// Fields are kept exactly as read from the file. A row may be shorter than
/// the header; missing trailing fields read as the empty string when compared.
pub type Row = Vec<String>;

/// Sort direction applied uniformly to every column of a sort specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Sort in ascending order (default)
    #[default]
    Ascending,
    /// Sort in descending order
    Descending,
}

/// Parses `ASC`, `DSC` or `DESC` in any letter case.
impl FromStr for SortDirection {
    type Err = MemSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Ascending),
            "DSC" | "DESC" => Ok(SortDirection::Descending),
            _ => Err(MemSortError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ASC"),
            SortDirection::Descending => write!(f, "DESC"),
        }
    }
}

/// Represents an in-memory table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Name of the table, derived from the source file stem
    name: String,

    /// Column names
    columns: Vec<String>,

    /// Map of column names to their indices
    column_map: HashMap<String, usize>,

    /// Rows of data
    rows: Vec<Row>,

    /// Source file path, if loaded from a file
    source_file: Option<PathBuf>,
}

impl Table {
    /// Create a new table with the given name and columns
    pub fn new(name: &str, columns: Vec<String>, source_file: Option<PathBuf>) -> Self {
        let mut column_map = HashMap::with_capacity(columns.len());
        // First occurrence wins for duplicate header names
        for (i, col) in columns.iter().enumerate() {
            column_map.entry(col.clone()).or_insert(i);
        }

        Table {
            name: name.to_string(),
            columns,
            column_map,
            rows: Vec::new(),
            source_file,
        }
    }

    /// Create a table from a header and rows in one go
    pub fn with_rows(name: &str, columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut table = Table::new(name, columns, None);
        table.rows = rows;
        table
    }

    /// Get the columns of the table
    ///
    /// The column names keep the order of the header row they were loaded from.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the column count
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the rows of the table
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get mutable access to the row order
    ///
    /// Sorts reorder rows through this slice; they never add or remove rows.
    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Get the name of the table
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the row count
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether a table has been loaded
    ///
    /// A table without a header is the state before the first load and after
    /// a failed one.
    pub fn is_loaded(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Append a row to the table
    ///
    /// Rows whose length differs from the header are kept as-is.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Drop the header and all rows
    pub fn clear(&mut self) {
        *self = Table::default();
    }

    /// Get the source file path
    ///
    /// # Returns
    /// * `Some(PathBuf)` containing the source file path
    /// * `None` if the table wasn't loaded from a file
    pub fn source_file(&self) -> Option<&PathBuf> {
        self.source_file.as_ref()
    }

    /// Record the file this table was loaded from
    pub fn set_source_file(&mut self, path: PathBuf) {
        self.source_file = Some(path);
    }

    /// Get the index of a column by name
    ///
    /// The lookup is case-sensitive even though row comparison is not.
    ///
    /// # Returns
    /// * `Some(usize)` with the column index if found
    /// * `None` if no column with that name exists
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_map.get(name).copied()
    }

    /// Resolve a list of column names into indices
    ///
    /// # Returns
    /// * `Ok(Vec<usize>)` with one index per name, in the given order
    /// * `Err(ColumnNotFound)` for the first name missing from the header
    pub fn resolve_columns<S: AsRef<str>>(&self, names: &[S]) -> MemSortResult<Vec<usize>> {
        if names.is_empty() {
            return Err(MemSortError::EmptyColumnList);
        }

        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.column_index(name)
                    .ok_or_else(|| MemSortError::ColumnNotFound(name.to_string()))
            })
            .collect()
    }

    /// Reorder the rows with the given algorithm and sort specification
    ///
    /// Header and row contents are untouched; only row order changes.
    pub fn sort_by_spec(&mut self, algorithm: SortAlgorithm, spec: &SortSpec) {
        algorithm.sort_by(&mut self.rows, |a, b| {
            compare_rows(a, b, spec.columns(), spec.direction())
        });
    }

    /// Print the table for display
    ///
    /// Writes the header, one bracketed line per row and a total line. This is
    /// the "show data" view, not the CSV export format.
    pub fn print_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", bracketed(&self.columns))?;
        for row in &self.rows {
            writeln!(out, "{}", bracketed(row))?;
        }
        writeln!(out, "Total number of rows in memory: {}", self.rows.len())?;
        Ok(())
    }
}

fn bracketed(fields: &[String]) -> String {
    format!("[{}]", fields.join(", "))
}
