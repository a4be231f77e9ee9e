//! Configuration module for memsort
//!
//! This module provides a centralized configuration structure for the application.
//! It is built once from the command line and passed by reference to the
//! components that need it, rather than using global state.

use std::path::{Path, PathBuf};

use crate::cli::MemSortArgs;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether to show verbose output on stderr
    verbose: bool,

    /// CSV file loaded up front in batch mode and offered as the menu's default
    input_file: PathBuf,

    /// Export target for batch mode; stdout when absent
    output_file: Option<PathBuf>,
}

impl AppConfig {
    /// Create a new application configuration
    ///
    /// # Arguments
    /// * `verbose` - Whether to show verbose output
    /// * `input_file` - Default CSV file to load
    /// * `output_file` - Optional export target for batch mode
    pub fn new(verbose: bool, input_file: PathBuf, output_file: Option<PathBuf>) -> Self {
        Self {
            verbose,
            input_file,
            output_file,
        }
    }

    /// Build the configuration from parsed command-line arguments
    pub fn from_args(args: &MemSortArgs) -> Self {
        Self::new(args.verbose, args.file.clone(), args.output.clone())
    }

    /// Get the verbose flag
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Get the default input file
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    /// Get the batch export target
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(false, PathBuf::from(crate::cli::DEFAULT_INPUT_FILE), None)
    }
}
