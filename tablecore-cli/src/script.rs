//! Line-oriented store scripts
//!
//! One operation per line, executed in order against a single store.
//! Blank lines and lines starting with `#` are skipped. The first failing
//! line aborts the script.

use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use tablecore_core::{ColumnType, CoreProvider, LocalStore, RowHandle, Value};
use tracing::debug;

/// A parsed script line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddTable { table: String },
    AddColumn { table: String, column: String, column_type: ColumnType },
    Insert { table: String },
    Set { table: String, row: RowHandle, column: String, literal: String },
    Get { table: String, row: RowHandle, column: String },
    HasTable { table: String },
    Describe { table: String },
    Stats,
}

/// Split off the next whitespace-delimited token
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some((&input[..end], &input[end..]))
}

struct Tokens<'a> {
    command: &'a str,
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn take(&mut self, what: &str) -> Result<&'a str> {
        let (token, rest) =
            next_token(self.rest).ok_or_else(|| anyhow!("{}: missing {}", self.command, what))?;
        self.rest = rest;
        Ok(token)
    }

    fn row(&mut self) -> Result<RowHandle> {
        let raw = self.take("row")?;
        let row: u64 = raw.parse().with_context(|| format!("invalid row handle '{}'", raw))?;
        Ok(RowHandle(row))
    }

    /// Everything left on the line, trimmed
    fn remainder(&mut self, what: &str) -> Result<&'a str> {
        let rest = self.rest.trim();
        if rest.is_empty() {
            bail!("{}: missing {}", self.command, what);
        }
        self.rest = "";
        Ok(rest)
    }

    fn finish(self) -> Result<()> {
        match next_token(self.rest) {
            Some((extra, _)) => bail!("{}: unexpected argument '{}'", self.command, extra),
            None => Ok(()),
        }
    }
}

/// Parse one line; `None` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (command, rest) = next_token(line).ok_or_else(|| anyhow!("empty command"))?;
    let mut tokens = Tokens { command, rest };

    let parsed = match command {
        "add-table" => Command::AddTable {
            table: tokens.take("table")?.to_string(),
        },
        "add-column" => {
            let table = tokens.take("table")?.to_string();
            let column = tokens.take("column")?.to_string();
            let column_type = tokens.take("type")?.parse::<ColumnType>()?;
            Command::AddColumn { table, column, column_type }
        }
        "insert" => Command::Insert {
            table: tokens.take("table")?.to_string(),
        },
        "set" => {
            let table = tokens.take("table")?.to_string();
            let row = tokens.row()?;
            let column = tokens.take("column")?.to_string();
            let literal = tokens.remainder("value")?.to_string();
            Command::Set { table, row, column, literal }
        }
        "get" => {
            let table = tokens.take("table")?.to_string();
            let row = tokens.row()?;
            let column = tokens.take("column")?.to_string();
            Command::Get { table, row, column }
        }
        "has-table" => Command::HasTable {
            table: tokens.take("table")?.to_string(),
        },
        "describe" => Command::Describe {
            table: tokens.take("table")?.to_string(),
        },
        "stats" => Command::Stats,
        other => bail!("unknown command '{}'", other),
    };

    tokens.finish()?;
    Ok(Some(parsed))
}

impl Command {
    /// Run against `store`, writing any result to `out`
    pub fn execute<W: Write>(&self, store: &LocalStore, out: &mut W) -> Result<()> {
        match self {
            Command::AddTable { table } => {
                store.add_table(table)?;
                writeln!(out, "ok")?;
            }
            Command::AddColumn { table, column, column_type } => {
                store.add_column_to_table(table, column, *column_type)?;
                writeln!(out, "ok")?;
            }
            Command::Insert { table } => {
                let row = store.insert_empty_row(table)?;
                writeln!(out, "{}", row)?;
            }
            Command::Set { table, row, column, literal } => {
                let column_type = store.column_type(table, column)?;
                let value = Value::parse(literal, column_type)?;
                store.set_dynamic(table, *row, column, value)?;
                writeln!(out, "ok")?;
            }
            Command::Get { table, row, column } => {
                let value = store.get_dynamic(table, *row, column)?;
                writeln!(out, "{}", value)?;
            }
            Command::HasTable { table } => {
                writeln!(out, "{}", store.has_table(table))?;
            }
            Command::Describe { table } => {
                let rows = store.row_count(table)?;
                writeln!(out, "{}: {} rows", table, rows)?;
                for column in store.columns(table)? {
                    writeln!(out, "  {} {}", column.name, column.column_type)?;
                }
            }
            Command::Stats => {
                let stats = store.stats()?;
                writeln!(out, "{}", serde_json::to_string(&stats)?)?;
            }
        }
        Ok(())
    }
}

/// Execute every line of `source`, returning how many commands ran
pub fn run_script<W: Write>(source: &str, store: &LocalStore, out: &mut W) -> Result<usize> {
    let mut executed = 0;
    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        let context = || format!("line {}: {}", number, line.trim());

        let Some(command) = parse_line(line).with_context(context)? else {
            continue;
        };
        debug!(line = number, ?command, "executing");
        command.execute(store, out).with_context(context)?;
        executed += 1;
    }
    Ok(executed)
}

/// Script run by `tablecore demo`
pub const DEMO_SCRIPT: &str = "\
# A Person table with one int32 column
add-table Person
add-column Person Age int32
insert Person
get Person 0 Age
set Person 0 Age 42
get Person 0 Age
add-column Person Name string?
insert Person
set Person 1 Name \"Ada Lovelace\"
describe Person
get Person 1 Name
stats
";
