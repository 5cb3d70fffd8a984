// src/load/excel.rs
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::info;

use crate::error::ImportError;

use super::{source_name, Cell, RosterTable};

/// Read one worksheet into a [`RosterTable`]: the named sheet when given,
/// otherwise the first sheet in the workbook. The first row supplies the
/// header names; every later row becomes a data row.
///
/// Fails when the file is missing, the workbook cannot be parsed, or the
/// requested sheet does not exist.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_workbook<P: AsRef<Path>>(
    path: P,
    sheet: Option<&str>,
) -> Result<RosterTable, ImportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|source| ImportError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::NoWorksheet {
                path: path.to_path_buf(),
            })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|source| ImportError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(row) => row.iter().map(header_text).collect(),
        None => Vec::new(),
    };
    let rows: Vec<Vec<Cell>> = rows_iter
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    info!(
        sheet = %sheet_name,
        rows = rows.len(),
        columns = headers.len(),
        "loaded workbook"
    );

    Ok(RosterTable {
        source: source_name(path),
        headers,
        rows,
    })
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Convert a data cell to text. Numeric cells drop float formatting
/// artifacts, date cells render ISO-style so the year stays the leading
/// four characters, and spreadsheet error values become [`Cell::Error`].
fn cell_value(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Text(String::new()),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Text(i.to_string()),
        Data::Float(f) => Cell::Text(f.to_string()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Text(
            dt.as_datetime()
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        ),
        Data::Error(e) => Cell::Error(e.to_string()),
        other => Cell::Text(other.to_string()),
    }
}
