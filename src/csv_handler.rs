//! CSV file handling module for memsort
//!
//! This module loads CSV files into the in-memory table and writes tables back
//! out. The format is deliberately plain:
//!
//! - The first line is the header
//! - Every line is split on literal commas; there is no quoting or escaping,
//!   so a field containing a comma shifts the columns after it
//! - Rows may be shorter or longer than the header
//! - Fields are written back verbatim, joined with `,`, one row per line
//!
//! Lines are split by hand so blank lines survive as rows. The csv crate does
//! the buffered writing, configured with quoting disabled and flexible record
//! lengths.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::MemSortResult;
use crate::table::Table;

#[cfg(windows)]
const LINE_TERMINATOR: csv::Terminator = csv::Terminator::CRLF;
#[cfg(not(windows))]
const LINE_TERMINATOR: csv::Terminator = csv::Terminator::Any(b'\n');

#[cfg(windows)]
const LINE_END: &[u8] = b"\r\n";
#[cfg(not(windows))]
const LINE_END: &[u8] = b"\n";

/// Handles loading and saving CSV files
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvHandler;

impl CsvHandler {
    /// Create a new CsvHandler
    ///
    /// # Example
    /// ```
    /// # use memsort::csv_handler::CsvHandler;
    /// let handler = CsvHandler::new();
    /// ```
    pub fn new() -> Self {
        CsvHandler
    }

    /// Load a CSV file into a new table
    ///
    /// The table is named after the file stem and remembers its source path.
    ///
    /// # Returns
    /// * `Ok(Table)` - The loaded table
    /// * `Err` if the file can't be opened or read
    ///
    /// # Example
    /// ```no_run
    /// # use memsort::csv_handler::CsvHandler;
    /// # use memsort::error::MemSortResult;
    /// # fn example() -> MemSortResult<()> {
    /// let table = CsvHandler::new().load_csv("student-data.csv")?;
    /// println!("Loaded {} rows", table.row_count());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> MemSortResult<Table> {
        let path = path.as_ref();

        // Open the CSV file
        let file = File::open(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        // Parse it and remember where it came from
        let mut table = self.read_table(file, &name)?;
        table.set_source_file(path.to_path_buf());
        Ok(table)
    }

    /// Replace the contents of `table` with a CSV file
    ///
    /// The table is cleared before reading, so on error it is left empty
    /// rather than holding the previous data.
    pub fn load_into<P: AsRef<Path>>(&self, table: &mut Table, path: P) -> MemSortResult<()> {
        table.clear();
        *table = self.load_csv(path)?;
        Ok(())
    }

    /// Read a table from any reader
    ///
    /// Every line, blank ones included, becomes one row: a blank line is a row
    /// with a single empty field.
    pub fn read_table<R: Read>(&self, reader: R, name: &str) -> MemSortResult<Table> {
        let mut lines = BufReader::new(reader).lines();

        // Get headers
        let headers = match lines.next() {
            Some(line) => split_fields(&line?),
            None => Vec::new(),
        };

        // Read data rows
        let mut table = Table::new(name, headers, None);
        for line in lines {
            table.add_row(split_fields(&line?));
        }

        Ok(table)
    }

    /// Save a table to a CSV file, replacing any existing content
    pub fn save_table<P: AsRef<Path>>(&self, table: &Table, path: P) -> MemSortResult<()> {
        let file = File::create(path.as_ref())?;
        self.write_table(table, BufWriter::new(file))
    }

    /// Write a table as CSV to any writer
    ///
    /// Header first, then every row in its current order. A row holding a
    /// single empty field is written as a bare line ending so that it reads
    /// back as the same row.
    pub fn write_table<W: Write>(&self, table: &Table, mut writer: W) -> MemSortResult<()> {
        let lines: Vec<&[String]> = std::iter::once(table.columns())
            .chain(table.rows().iter().map(Vec::as_slice))
            .collect();

        // The csv writer always quotes a lone empty field, so blank rows
        // split the output into runs written around it
        for (i, run) in lines.split(|fields| is_blank(fields)).enumerate() {
            if i > 0 {
                writer.write_all(LINE_END)?;
            }
            if !run.is_empty() {
                write_records(&mut writer, run)?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

/// Split one line on literal commas
fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(String::from).collect()
}

/// Whether a row prints as an empty line
fn is_blank(fields: &[String]) -> bool {
    match fields {
        [] => true,
        [only] => only.is_empty(),
        _ => false,
    }
}

/// Write non-blank records through an unquoted, flexible csv writer
fn write_records<W: Write>(writer: W, records: &[&[String]]) -> MemSortResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .flexible(true)
        .terminator(LINE_TERMINATOR)
        .from_writer(writer);

    for record in records {
        csv_writer.write_record(*record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(content: &str) -> Table {
        CsvHandler::new()
            .read_table(content.as_bytes(), "test")
            .unwrap()
    }

    fn write(table: &Table) -> String {
        let mut out = Vec::new();
        CsvHandler::new().write_table(table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_read_splits_on_literal_commas() {
        let table = read("name,quote\nAnn,\"hello, world\"\n");
        assert_eq!(table.columns(), &["name".to_string(), "quote".to_string()]);
        // No quote handling: the comma inside quotes splits the field
        assert_eq!(
            table.rows()[0],
            vec!["Ann".to_string(), "\"hello".to_string(), " world\"".to_string()]
        );
    }

    #[test]
    fn test_read_accepts_ragged_rows() {
        let table = read("school,sex,age\nGP,F\nGP,F,18,extra\n\nMS,M,17\n");
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.rows()[0].len(), 2);
        assert_eq!(table.rows()[1].len(), 4);
        assert_eq!(table.rows()[2], vec![String::new()]);
    }

    #[test]
    fn test_write_is_verbatim() {
        let table = read("name,note\nAnn, spaced \nBob,\"q\"\nCid\n");
        let written = write(&table);
        assert_eq!(
            written.lines().collect::<Vec<_>>(),
            vec!["name,note", "Ann, spaced ", "Bob,\"q\"", "Cid"]
        );
    }

    #[test]
    fn test_load_into_clears_on_failure() {
        let mut table = read("a,b\n1,2\n");
        let result = CsvHandler::new().load_into(&mut table, "/nonexistent/memsort/missing.csv");
        assert!(result.is_err());
        assert!(!table.is_loaded());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_read_handles_crlf_and_missing_final_newline() {
        let table = read("a,b\r\n1,2\r\n3,4");
        assert_eq!(table.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.rows()[0], vec!["1".to_string(), "2".to_string()]);
        assert_eq!(table.rows()[1], vec!["3".to_string(), "4".to_string()]);
    }

    #[test]
    fn test_blank_rows_round_trip() {
        let table = Table::with_rows(
            "notes",
            vec!["note".to_string()],
            vec![
                vec![String::new()],
                vec!["x".to_string()],
                vec![String::new()],
                vec![String::new()],
            ],
        );

        let written = write(&table);
        assert_eq!(written.lines().collect::<Vec<_>>(), vec!["note", "", "x", "", ""]);
        assert!(!written.contains('"'));

        let reloaded = read(&written);
        assert_eq!(reloaded.columns(), table.columns());
        assert_eq!(reloaded.rows(), table.rows());
    }
}
