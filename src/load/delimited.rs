// src/load/delimited.rs
use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use crate::error::ImportError;

use super::{source_name, Cell, RosterTable};

/// Read a comma-separated file into a [`RosterTable`]. The first line is
/// the header; short data rows are tolerated and read back as empty cells.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<RosterTable, ImportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| ImportError::Delimited {
            path: path.to_path_buf(),
            source,
        })?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|source| ImportError::Delimited {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|source| ImportError::Delimited {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(Cell::text).collect());
    }

    info!(
        rows = rows.len(),
        columns = headers.len(),
        "loaded delimited file"
    );

    Ok(RosterTable {
        source: source_name(path),
        headers,
        rows,
    })
}
