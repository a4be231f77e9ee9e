//! CLI argument parsing module for memsort
//!
//! This module defines the command-line interface using the clap crate. With
//! no `-s` option the program starts the interactive menu; with one or more
//! `-s` commands it runs them in batch against the input file and exports the
//! result.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// File used when none is given on the command line
pub const DEFAULT_INPUT_FILE: &str = "student-data.csv";

/// Command-line arguments for memsort
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "In-memory CSV table with classic sorting algorithms"
)]
pub struct MemSortArgs {
    /// CSV file to load
    ///
    /// In the interactive menu this is the default answer to the load prompt.
    /// In batch mode it is loaded before the first command runs.
    #[clap(default_value = DEFAULT_INPUT_FILE, help = "CSV file to load")]
    pub file: PathBuf,

    /// Select commands to execute in batch mode
    ///
    /// Each command has the form
    /// `select <cols> from <table> order by <col> <ASC|DSC|DESC> with <sort>`
    /// and sorts the table left by the previous one.
    /// Example: -s "select * from students order by age DSC with merge_sort"
    #[clap(short, long, help = "Select command to execute (batch mode)")]
    pub sql: Vec<String>,

    /// Where to export the sorted table in batch mode (stdout if omitted)
    #[clap(short, long, help = "Output CSV file for batch mode")]
    pub output: Option<PathBuf>,

    /// Enable verbose diagnostic output
    #[clap(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl MemSortArgs {
    /// Whether batch mode was requested
    pub fn is_batch(&self) -> bool {
        !self.sql.is_empty()
    }
}

/// Parse command-line arguments into the MemSortArgs structure
///
/// Help, version and usage errors are handled by clap itself.
pub fn parse_args() -> Result<MemSortArgs> {
    Ok(MemSortArgs::parse())
}
