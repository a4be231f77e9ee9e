//! Interactive menu for memsort
//!
//! A numbered console menu over a single in-memory table. Every action reports
//! its failure on the error stream and returns to the menu; only the exit
//! choice or end of input ends the loop.
//!
//! The menu is generic over its input and output streams so it can be driven
//! from stdin/stdout or from in-memory buffers.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::command::CommandParser;
use crate::config::AppConfig;
use crate::csv_handler::CsvHandler;
use crate::error::{MemSortError, MemSortResult};
use crate::legacy::GroupingSort;
use crate::sort::{SortAlgorithm, SortSpec};
use crate::table::{SortDirection, Table};

/// Entries of the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Load a CSV file, replacing the table
    Load,
    /// Export the table to a CSV file
    Export,
    /// Print the table
    Show,
    /// School/sex/age bubble sort, then export
    BubbleGrouping,
    /// School/sex/age insertion sort, then export
    InsertionGrouping,
    /// Sort by chosen columns, direction and algorithm, then export
    SortColumns,
    /// Run a select command, then export
    Select,
    /// Leave the menu
    Exit,
}

impl MenuChoice {
    /// Every choice, in the order it is listed
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Load,
        MenuChoice::Export,
        MenuChoice::Show,
        MenuChoice::BubbleGrouping,
        MenuChoice::InsertionGrouping,
        MenuChoice::SortColumns,
        MenuChoice::Select,
        MenuChoice::Exit,
    ];

    /// Parse a menu answer
    ///
    /// Accepts the entry number or the first word of its label, in any case.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        if let Ok(number) = input.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|i| MenuChoice::ALL.get(i).copied());
        }

        match input.as_str() {
            "load" => Some(MenuChoice::Load),
            "export" => Some(MenuChoice::Export),
            "show" => Some(MenuChoice::Show),
            "bubble" => Some(MenuChoice::BubbleGrouping),
            "insertion" => Some(MenuChoice::InsertionGrouping),
            "sort" => Some(MenuChoice::SortColumns),
            "select" => Some(MenuChoice::Select),
            "exit" | "quit" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuChoice::Load => "Load CSV",
            MenuChoice::Export => "Export CSV",
            MenuChoice::Show => "Show data",
            MenuChoice::BubbleGrouping => "Bubble sort & export (school, sex, age)",
            MenuChoice::InsertionGrouping => "Insertion sort & export (school, sex, age)",
            MenuChoice::SortColumns => "Sort by columns & export",
            MenuChoice::Select => "Run select command & export",
            MenuChoice::Exit => "Exit",
        };
        write!(f, "{}", label)
    }
}

/// Interactive menu over one table
pub struct Menu<'a, R, W, E> {
    /// Application configuration
    config: &'a AppConfig,
    /// The in-memory table
    table: Table,
    /// CSV load/export
    csv_handler: CsvHandler,
    /// Parser for select commands
    parser: CommandParser,
    /// Answers to prompts
    input: R,
    /// Menu, prompts and results
    out: W,
    /// Error reports and verbose diagnostics
    err: E,
}

impl<'a, R: BufRead, W: Write, E: Write> Menu<'a, R, W, E> {
    /// Create a menu with an empty table
    pub fn new(config: &'a AppConfig, input: R, out: W, err: E) -> Self {
        Menu {
            config,
            table: Table::default(),
            csv_handler: CsvHandler::new(),
            parser: CommandParser::new(),
            input,
            out,
            err,
        }
    }

    /// Get the current table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Run the menu until the exit choice or end of input
    ///
    /// Failed actions are reported and the loop continues. Only a failure to
    /// write to the output streams ends the loop with an error.
    pub fn run(&mut self) -> MemSortResult<()> {
        loop {
            self.print_menu()?;

            let answer = match self.read_line()? {
                Some(answer) => answer,
                None => {
                    writeln!(self.out)?;
                    writeln!(self.out, "Exiting......")?;
                    return Ok(());
                }
            };

            let choice = match MenuChoice::parse(&answer) {
                Some(choice) => choice,
                None => {
                    writeln!(self.out, "Invalid choice")?;
                    continue;
                }
            };

            if choice == MenuChoice::Exit {
                writeln!(self.out, "Exiting......")?;
                return Ok(());
            }

            if let Err(e) = self.execute(choice) {
                writeln!(self.err, "Error: {}", e)?;
            }
        }
    }

    /// Run one menu action
    pub fn execute(&mut self, choice: MenuChoice) -> MemSortResult<()> {
        match choice {
            MenuChoice::Load => self.load(),
            MenuChoice::Export => self.export(),
            MenuChoice::Show => self.show(),
            MenuChoice::BubbleGrouping => self.grouping_sort(GroupingSort::Bubble),
            MenuChoice::InsertionGrouping => self.grouping_sort(GroupingSort::Insertion),
            MenuChoice::SortColumns => self.sort_columns(),
            MenuChoice::Select => self.select(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn print_menu(&mut self) -> MemSortResult<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- Memory DB Sort Menu ---")?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, choice)?;
        }
        write!(self.out, "Enter choice: ")?;
        self.out.flush()?;
        Ok(())
    }

    fn load(&mut self) -> MemSortResult<()> {
        let default = self.config.input_file().to_path_buf();
        let Some(answer) = self.prompt(&format!(
            "Enter input filename(.csv) [{}]: ",
            default.display()
        ))?
        else {
            return Ok(());
        };
        let path = if answer.is_empty() {
            default
        } else {
            PathBuf::from(answer)
        };

        self.csv_handler.load_into(&mut self.table, &path)?;
        self.log(format_args!(
            "Loaded {} rows, {} columns from {}",
            self.table.row_count(),
            self.table.column_count(),
            path.display()
        ))?;

        writeln!(self.out, "Loaded {} :", path.display())?;
        self.table.print_to(&mut self.out)?;
        Ok(())
    }

    fn export(&mut self) -> MemSortResult<()> {
        self.require_loaded()?;
        if let Some(path) = self.prompt_output("Enter output filename(.csv): ")? {
            writeln!(self.out, "Exported to {}", path.display())?;
        }
        Ok(())
    }

    fn show(&mut self) -> MemSortResult<()> {
        self.require_loaded()?;
        self.table.print_to(&mut self.out)?;
        Ok(())
    }

    fn grouping_sort(&mut self, strategy: GroupingSort) -> MemSortResult<()> {
        self.require_loaded()?;

        let title = capitalize(strategy.name());
        writeln!(self.out, "Sorting using {} Sort ...", title)?;
        strategy.sort(self.table.rows_mut());

        if let Some(path) = self.prompt_output("Enter output filename for sorted data(.csv): ")? {
            writeln!(self.out, "{}-sorted data exported to {}", title, path.display())?;
        }
        Ok(())
    }

    fn sort_columns(&mut self) -> MemSortResult<()> {
        self.require_loaded()?;

        // Collect every answer before validating any of them
        let Some(columns) = self.prompt("Enter column names (comma-separated): ")? else {
            return Ok(());
        };
        let Some(direction) = self.prompt("Enter direction (ASC/DSC/DESC) [ASC]: ")? else {
            return Ok(());
        };
        let Some(algorithm) = self.prompt("Enter sort algorithm (bubble/insertion/merge/quick): ")?
        else {
            return Ok(());
        };

        let names: Vec<&str> = columns
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        let columns = self.table.resolve_columns(&names)?;
        let direction = if direction.is_empty() {
            SortDirection::Ascending
        } else {
            direction.parse()?
        };
        let algorithm: SortAlgorithm = algorithm.parse()?;

        self.sort_and_export(algorithm, SortSpec::new(columns, direction))
    }

    fn select(&mut self) -> MemSortResult<()> {
        let Some(line) = self.prompt("Enter command: ")? else {
            return Ok(());
        };
        let command = self.parser.parse(&line)?;
        self.log(format_args!("Parsed command: {}", command))?;

        self.require_loaded()?;
        let spec = command.resolve(&self.table)?;
        self.sort_and_export(command.algorithm(), spec)
    }

    fn sort_and_export(&mut self, algorithm: SortAlgorithm, spec: SortSpec) -> MemSortResult<()> {
        let names: Vec<&str> = spec
            .columns()
            .iter()
            .map(|&i| self.table.columns()[i].as_str())
            .collect();
        writeln!(
            self.out,
            "Sorting by {} {} using {} ...",
            names.join(", "),
            spec.direction(),
            algorithm
        )?;

        self.table.sort_by_spec(algorithm, &spec);
        self.log(format_args!(
            "Sorted {} rows with {} ({})",
            self.table.row_count(),
            algorithm,
            if algorithm.is_stable() { "stable" } else { "not stable" }
        ))?;

        if let Some(path) = self.prompt_output("Enter output filename for sorted data(.csv): ")? {
            writeln!(self.out, "Sorted data exported to {}", path.display())?;
        }
        Ok(())
    }

    /// Ask for an output path and export the table there
    ///
    /// Returns the path written, or `None` at end of input.
    fn prompt_output(&mut self, prompt: &str) -> MemSortResult<Option<PathBuf>> {
        let Some(answer) = self.prompt(prompt)? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Err(MemSortError::MissingOutputPath);
        }

        let path = PathBuf::from(answer);
        self.save(&path)?;
        Ok(Some(path))
    }

    fn save(&mut self, path: &Path) -> MemSortResult<()> {
        self.csv_handler.save_table(&self.table, path)?;
        self.log(format_args!(
            "Wrote {} rows to {}",
            self.table.row_count(),
            path.display()
        ))
    }

    fn require_loaded(&self) -> MemSortResult<()> {
        if self.table.is_loaded() {
            Ok(())
        } else {
            Err(MemSortError::NoTableLoaded)
        }
    }

    /// Write a prompt and read the trimmed answer
    fn prompt(&mut self, prompt: &str) -> MemSortResult<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        self.read_line()
    }

    /// Read one line, `None` at end of input
    fn read_line(&mut self) -> MemSortResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn log(&mut self, message: fmt::Arguments<'_>) -> MemSortResult<()> {
        if self.config.verbose() {
            writeln!(self.err, "{}", message)?;
        }
        Ok(())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
