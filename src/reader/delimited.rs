//! Delimited text tables.
//!
//! Each non-empty line is one row, even when all its cells are blank. Cells
//! are split on a single delimiter character and typed by
//! [`Value::parse_cell`]. Quoting is not supported.

use crate::access::{Row, Value};
use crate::reader::InMemoryBook;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse delimited text into rows
pub fn parse_delimited(text: &str, delimiter: char) -> Vec<Row> {
    text.lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| line.split(delimiter).map(Value::parse_cell).collect())
        .collect()
}

/// Load a delimited file as a one-sheet workbook named after the file stem
pub fn load_delimited(path: impl AsRef<Path>, delimiter: char) -> Result<InMemoryBook> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read table {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string());

    let rows = parse_delimited(&text, delimiter);
    log::debug!("loaded {} rows from {}", rows.len(), path.display());
    Ok(InMemoryBook::new().with_sheet(name, rows))
}
