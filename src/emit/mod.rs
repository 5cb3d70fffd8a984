// src/emit/mod.rs
use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::error::ImportError;
use crate::process::{clean_text, StudentRow};

/// What the generated INSERT does when `registration_no` already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Leave the existing row untouched; re-imports are no-ops.
    DoNothing,
    /// Refresh name, school and admission year. Never touches `status`,
    /// so workflow progress survives a re-import.
    UpdateDetails,
}

/// Everything the emitter needs besides the rows themselves.
#[derive(Debug, Clone)]
pub struct ScriptOptions {
    /// Fully qualified table the INSERT targets.
    pub table: String,
    /// Status stamped on every imported row.
    pub status: String,
    /// Source file name, shown in the script banner.
    pub source: String,
    pub conflict: ConflictPolicy,
    /// Also emit the per-status breakdown and a row sample.
    pub extended_checks: bool,
}

const BANNER: &str =
    "-- ============================================================================";

/// Assemble the full script: banner, one bulk INSERT (omitted when there
/// are no rows), conflict clause and verification queries.
pub fn build_script(opts: &ScriptOptions, students: &[StudentRow]) -> String {
    let status = clean_text(&opts.status);
    let mut sql = String::new();

    sql.push_str(BANNER);
    sql.push('\n');
    sql.push_str("-- CONVOCATION STUDENT LIST IMPORT\n");
    sql.push_str(&format!("-- Generated from: {}\n", opts.source));
    sql.push_str(&format!(
        "-- Generated at: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    sql.push_str(&format!("-- Total Students: {}\n", students.len()));
    sql.push_str(BANNER);
    sql.push_str("\n\n");

    if students.is_empty() {
        sql.push_str("-- No eligible students found in the source file; INSERT omitted.\n");
    } else {
        sql.push_str("-- Insert convocation eligible students\n");
        sql.push_str(&format!("INSERT INTO {} (\n", opts.table));
        sql.push_str("    registration_no,\n");
        sql.push_str("    student_name,\n");
        sql.push_str("    school,\n");
        sql.push_str("    admission_year,\n");
        sql.push_str("    status\n");
        sql.push_str(") VALUES\n");

        let tuples: Vec<String> = students
            .iter()
            .map(|student| row_tuple(student, &status))
            .collect();
        sql.push_str(&tuples.join(",\n"));
        sql.push('\n');
        sql.push_str(conflict_clause(opts.conflict));
    }

    sql.push('\n');
    sql.push_str(&verification_queries(opts));
    sql
}

/// One VALUES tuple. Field text is already escaped by the transformer.
fn row_tuple(student: &StudentRow, status: &str) -> String {
    format!(
        "    ('{}', '{}', '{}', '{}', '{}')",
        student.registration_no,
        student.student_name,
        student.school,
        student.admission_year,
        status
    )
}

fn conflict_clause(policy: ConflictPolicy) -> &'static str {
    match policy {
        ConflictPolicy::DoNothing => "ON CONFLICT (registration_no) DO NOTHING;\n",
        ConflictPolicy::UpdateDetails => {
            "ON CONFLICT (registration_no) DO UPDATE SET\n    \
             student_name = EXCLUDED.student_name,\n    \
             school = EXCLUDED.school,\n    \
             admission_year = EXCLUDED.admission_year;\n"
        }
    }
}

/// Read-back queries appended to every script so the operator can check
/// the import from the same console.
fn verification_queries(opts: &ScriptOptions) -> String {
    let table = &opts.table;
    let mut sql = String::new();

    sql.push_str(BANNER);
    sql.push('\n');
    sql.push_str("-- VERIFICATION QUERIES\n");
    sql.push_str(BANNER);
    sql.push_str("\n\n");

    sql.push_str("-- Total imported students\n");
    sql.push_str(&format!("SELECT COUNT(*) AS total_students\nFROM {table};\n\n"));

    sql.push_str("-- Students per school\n");
    sql.push_str(&format!(
        "SELECT school, COUNT(*) AS student_count\nFROM {table}\nGROUP BY school\nORDER BY school;\n\n"
    ));

    sql.push_str("-- Students per admission year\n");
    sql.push_str(&format!(
        "SELECT admission_year, COUNT(*) AS student_count\nFROM {table}\nGROUP BY admission_year\nORDER BY admission_year DESC;\n"
    ));

    if opts.extended_checks {
        sql.push('\n');
        sql.push_str("-- Students per status\n");
        sql.push_str(&format!(
            "SELECT status, COUNT(*) AS student_count\nFROM {table}\nGROUP BY status;\n\n"
        ));
        sql.push_str("-- Sample of imported rows\n");
        sql.push_str(&format!("SELECT *\nFROM {table}\nLIMIT 10;\n"));
    }

    sql
}

/// Write the script to `path`, or print it to stdout framed by separator
/// lines when no path is given.
pub fn write_output(path: Option<&Path>, script: &str) -> Result<(), ImportError> {
    match path {
        Some(path) => {
            fs::write(path, script).map_err(|source| ImportError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = %path.display(), bytes = script.len(), "wrote SQL script");
        }
        None => {
            println!("{}", "=".repeat(80));
            println!("{script}");
            println!("{}", "=".repeat(80));
        }
    }
    Ok(())
}
