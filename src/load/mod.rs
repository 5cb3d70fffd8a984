// src/load/mod.rs
use std::path::Path;

pub mod delimited;
pub mod excel;

/// One cell as read from an input file.
///
/// Delimited files only ever yield `Text`. Spreadsheets can also carry
/// error values (`#DIV/0!`, `#N/A`, ...), which surface as `Error` so the
/// transformer can skip the row instead of importing the marker as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Error(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

/// An input file buffered in memory: header names plus all data rows.
///
/// Rows keep file order and may be shorter than `headers`; the transformer
/// reads missing trailing cells as empty.
#[derive(Debug)]
pub struct RosterTable {
    /// File name of the source, used in the generated script's banner.
    pub source: String,
    /// Column names from the header row, in file order.
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RosterTable {
    /// 1-based position of a data row in the source file, counting the
    /// header as row 1. Used for row-level log messages.
    pub fn source_row(index: usize) -> usize {
        index + 2
    }
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
