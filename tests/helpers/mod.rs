//! Test helpers for memsort integration tests
//!
//! This module provides helper functions and a test-case struct to simplify
//! driving the memsort binary in batch mode.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Represents a batch-mode test case for memsort
pub struct MemSortTestCase {
    /// Select commands, run in order
    pub commands: Vec<String>,
    /// Additional command line arguments
    pub args: Vec<String>,
    /// Expected strings in stdout
    pub expected_stdout: Vec<String>,
    /// Expected strings in stderr
    pub expected_stderr: Vec<String>,
    /// Whether the command is expected to succeed
    pub should_succeed: bool,
    /// Whether to use verbose mode
    pub verbose: bool,
}

impl Default for MemSortTestCase {
    fn default() -> Self {
        MemSortTestCase {
            commands: Vec::new(),
            args: Vec::new(),
            expected_stdout: Vec::new(),
            expected_stderr: Vec::new(),
            should_succeed: true,
            verbose: false,
        }
    }
}

/// Run a test case against the standard people file in a fresh temp dir
#[allow(dead_code)]
pub fn run_test_case(test_case: MemSortTestCase) -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let test_file = prepare_test_file(temp_dir.path())?;
    run_test_case_with_file(test_case, &test_file)
}

/// Run a test case against a given CSV file
pub fn run_test_case_with_file(
    test_case: MemSortTestCase,
    test_file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("memsort")?;

    for sql in &test_case.commands {
        cmd.arg("-s").arg(sql);
    }
    if test_case.verbose {
        cmd.arg("-v");
    }
    for arg in &test_case.args {
        cmd.arg(arg);
    }
    cmd.arg(test_file);

    let mut assert = cmd.assert();
    if test_case.should_succeed {
        assert = assert.success();
    } else {
        assert = assert.failure();
    }

    for expected in test_case.expected_stdout {
        assert = assert.stdout(predicate::str::contains(expected));
    }
    for expected in test_case.expected_stderr {
        assert = assert.stderr(predicate::str::contains(expected));
    }

    Ok(())
}

/// Create a temp directory for tests, respecting CARGO_TARGET_TMPDIR if set
pub fn create_temp_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
    if let Ok(cargo_target_tmpdir) = env::var("CARGO_TARGET_TMPDIR") {
        fs::create_dir_all(&cargo_target_tmpdir)?;
        Ok(TempDir::new_in(cargo_target_tmpdir)?)
    } else {
        Ok(TempDir::new()?)
    }
}

/// Create the standard test CSV file with people data
pub fn prepare_test_file(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    create_custom_csv(dir, "people.csv", "id,name,age\n1,Alice,32\n2,Bob,25\n3,Charlie,9\n")
}

/// Create a test CSV file with custom data
pub fn create_custom_csv(
    dir: &Path,
    filename: &str,
    content: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Extract the non-empty lines of command output
#[allow(dead_code)]
pub fn output_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
