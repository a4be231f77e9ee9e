//! SQL-like command interpreter for memsort
//!
//! Understands exactly one statement shape:
//!
//! ```text
//! select <col-list> from <table> order by <column> <ASC|DSC|DESC> with <sort-name>
//! ```
//!
//! Keywords are case-insensitive. Parsing walks the line in a fixed sequence of
//! keyword boundaries (`select`, `from`, `order by`, `with`) and each step has
//! its own error, so a malformed line always names what is missing. The table
//! name is never checked, and the select list is kept for display only: the
//! whole row is always exported.

use std::fmt;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::error::{MemSortError, MemSortResult};
use crate::sort::{SortAlgorithm, SortSpec};
use crate::table::{SortDirection, Table};

const SELECT_KEYWORD: &str = "select";

/// Keyword patterns, compiled on first use
static KEYWORDS: OnceLock<CommandParser> = OnceLock::new();

/// A parsed `select ... order by ... with ...` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectCommand {
    /// Column names from the select list (informational only)
    select_list: Vec<String>,
    /// Table name as written; not validated
    table_name: String,
    /// Column to order by, matched case-sensitively against the header
    order_column: String,
    /// Sort direction
    direction: SortDirection,
    /// Sort algorithm to run
    algorithm: SortAlgorithm,
}

impl SelectCommand {
    /// Get the select list
    pub fn select_list(&self) -> &[String] {
        &self.select_list
    }

    /// Get the table name as written in the command
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Get the order-by column name
    pub fn order_column(&self) -> &str {
        &self.order_column
    }

    /// Get the sort direction
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Get the sort algorithm
    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    /// Resolve the order-by column against a table header
    ///
    /// # Returns
    /// * `Ok(SortSpec)` with the single resolved column and the direction
    /// * `Err(ColumnNotFound)` if the header has no column with that exact name
    pub fn resolve(&self, table: &Table) -> MemSortResult<SortSpec> {
        let columns = table.resolve_columns(&[self.order_column.as_str()])?;
        Ok(SortSpec::new(columns, self.direction))
    }

    /// Sort the table as the command describes
    ///
    /// The table is only touched once the column resolves; on error it is
    /// left exactly as it was.
    pub fn execute(&self, table: &mut Table) -> MemSortResult<()> {
        if !table.is_loaded() {
            return Err(MemSortError::NoTableLoaded);
        }

        // Resolve before sorting so a bad column leaves the rows alone
        let spec = self.resolve(table)?;
        table.sort_by_spec(self.algorithm, &spec);
        Ok(())
    }
}

impl fmt::Display for SelectCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "select {} from {} order by {} {} with {}_sort",
            self.select_list.join(", "),
            self.table_name,
            self.order_column,
            self.direction,
            self.algorithm.name()
        )
    }
}

/// Parser holding the compiled keyword patterns
///
/// Each keyword must be surrounded by whitespace and is matched at its first
/// occurrence after the previous one.
#[derive(Debug, Clone)]
pub struct CommandParser {
    from: Regex,
    order_by: Regex,
    with: Regex,
}

impl CommandParser {
    /// Get a parser sharing the compiled keyword patterns
    pub fn new() -> Self {
        KEYWORDS
            .get_or_init(|| CommandParser {
                from: keyword(r"\sfrom\s"),
                order_by: keyword(r"\sorder\s+by\s"),
                with: keyword(r"\swith\s"),
            })
            .clone()
    }

    /// Parse one command line
    ///
    /// Nothing here looks at table data; column names are resolved later by
    /// [`SelectCommand::resolve`].
    pub fn parse(&self, line: &str) -> MemSortResult<SelectCommand> {
        let line = line.trim();

        // select
        let after_select = strip_select(line)?;

        // from
        let (select_clause, after_from) = split_at_keyword(&self.from, after_select, "from")?;
        let select_list = select_clause
            .split(',')
            .map(str::trim)
            .filter(|col| !col.is_empty())
            .map(String::from)
            .collect();

        // order by
        let (table_clause, order_clause) =
            split_at_keyword(&self.order_by, after_from, "order by")?;

        // <column> <direction> with <sort>
        let tokens: Vec<&str> = order_clause.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(MemSortError::IncompleteOrderBy(order_clause.to_string()));
        }
        let order_column = tokens[0].to_string();
        let direction = tokens[1].parse::<SortDirection>()?;

        // with
        let (_, with_clause) = split_at_keyword(&self.with, order_clause, "with")?;
        let sort_name = with_clause
            .split_whitespace()
            .next()
            .ok_or_else(|| MemSortError::IncompleteOrderBy(order_clause.to_string()))?;
        let algorithm = sort_name.parse::<SortAlgorithm>()?;

        Ok(SelectCommand {
            select_list,
            table_name: table_clause.trim().to_string(),
            order_column,
            direction,
            algorithm,
        })
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        CommandParser::new()
    }
}

/// Parse a command with the shared parser
pub fn parse_command(line: &str) -> MemSortResult<SelectCommand> {
    CommandParser::new().parse(line)
}

/// Parse a command and run it against a table
///
/// # Returns
/// * `Ok(SelectCommand)` describing what was run
/// * `Err` for any parse or resolution failure, with the table unchanged
pub fn run_command(table: &mut Table, line: &str) -> MemSortResult<SelectCommand> {
    let command = parse_command(line)?;
    command.execute(table)?;
    Ok(command)
}

/// Build a case-insensitive keyword pattern from a literal
fn keyword(pattern: &'static str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("keyword patterns are valid literals")
}

/// Check for the `select` keyword and return the text after it
///
/// The returned slice keeps its leading whitespace so the `from` search can
/// match an empty select list.
fn strip_select(line: &str) -> MemSortResult<&str> {
    // Prefix match without slicing through a multi-byte char
    let is_select = line
        .get(..SELECT_KEYWORD.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(SELECT_KEYWORD));
    let rest = &line[if is_select { SELECT_KEYWORD.len() } else { 0 }..];

    if is_select && rest.starts_with(char::is_whitespace) {
        Ok(rest)
    } else {
        Err(MemSortError::NotASelect(line.to_string()))
    }
}

/// Split `input` around the first match of a keyword pattern
fn split_at_keyword<'a>(
    pattern: &Regex,
    input: &'a str,
    name: &'static str,
) -> MemSortResult<(&'a str, &'a str)> {
    // First occurrence only; later repeats stay in the right half
    let found = pattern
        .find(input)
        .ok_or(MemSortError::MissingKeyword(name))?;
    Ok((&input[..found.start()], &input[found.end()..]))
}
