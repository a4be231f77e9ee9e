//! memsort - an in-memory CSV table with classic sorting algorithms
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments
//! 2. Without `-s`: run the interactive menu over stdin/stdout/stderr
//! 3. With `-s`: load the input file, run each select command in order, and
//!    export the sorted table to `--output` or stdout

use std::io;

use anyhow::{Context, Result};

use memsort::cli;
use memsort::command::CommandParser;
use memsort::config::AppConfig;
use memsort::csv_handler::CsvHandler;
use memsort::menu::Menu;

fn main() -> Result<()> {
    let args = cli::parse_args()?;
    let config = AppConfig::from_args(&args);

    if config.verbose() {
        eprintln!("Running in verbose mode");
        eprintln!("Arguments: {args:?}");
    }

    if !args.is_batch() {
        let stdin = io::stdin();
        let mut menu = Menu::new(&config, stdin.lock(), io::stdout(), io::stderr());
        menu.run().context("Menu terminated")?;
        return Ok(());
    }

    run_batch(&config, &args.sql)
}

/// Load the input file, apply every command in order, then export once
fn run_batch(config: &AppConfig, commands: &[String]) -> Result<()> {
    let csv_handler = CsvHandler::new();
    let parser = CommandParser::new();

    let input = config.input_file();
    let mut table = csv_handler
        .load_csv(input)
        .with_context(|| format!("Failed to load file: {}", input.display()))?;

    if config.verbose() {
        eprintln!(
            "Loaded {} rows, {} columns from {}",
            table.row_count(),
            table.column_count(),
            input.display()
        );
    }

    for sql in commands {
        let command = parser
            .parse(sql)
            .with_context(|| format!("Failed to parse command: {sql}"))?;
        command
            .execute(&mut table)
            .with_context(|| format!("Failed to execute command: {sql}"))?;

        if config.verbose() {
            eprintln!("Executed: {command}");
        }
    }

    match config.output_file() {
        Some(path) => {
            csv_handler
                .save_table(&table, path)
                .with_context(|| format!("Failed to export to: {}", path.display()))?;
            if config.verbose() {
                eprintln!("Exported {} rows to {}", table.row_count(), path.display());
            }
        }
        None => {
            csv_handler
                .write_table(&table, io::stdout().lock())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
