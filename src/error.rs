// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::StudentField;

/// Failure kinds for a conversion run. Everything except `Row` is
/// structural and aborts the run; `Row` failures are counted and skipped
/// by the transformer.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("could not read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {path} contains no worksheets")]
    NoWorksheet { path: PathBuf },

    #[error("could not read delimited file {path}: {source}")]
    Delimited {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("column mapping incomplete; no header matched: {}", join_fields(.missing))]
    MappingIncomplete { missing: Vec<StudentField> },

    #[error("required column `{column}` is missing from the header row")]
    MissingColumn { column: String },

    #[error("row {row}: {message}")]
    Row { row: usize, message: String },

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_fields(fields: &[StudentField]) -> String {
    fields
        .iter()
        .map(StudentField::column_name)
        .collect::<Vec<_>>()
        .join(", ")
}
