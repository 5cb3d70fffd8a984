// src/config.rs
//! Defaults shared by the two converters. Every value can be overridden
//! from the command line per run.

/// Table the generated INSERT targets. The converters never create or
/// migrate it; the ceremony service owns the schema.
pub const DEFAULT_TABLE: &str = "public.convocation_eligible_students";

/// Status stamped on every imported row. Later workflow stages move rows
/// out of this state; imports never write anything else.
pub const DEFAULT_STATUS: &str = "not_started";

/// Output path for the generated script.
pub const DEFAULT_OUTPUT: &str = "IMPORT_CONVOCATION_STUDENTS.sql";

/// Spreadsheet produced by the passout-batch export.
pub const DEFAULT_EXCEL_INPUT: &str = "data/Passout_batch.xlsx";

/// Delimited file produced by the roster cleanup step.
pub const DEFAULT_CSV_INPUT: &str = "fetch_cleaned.csv";
