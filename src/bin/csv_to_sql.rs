//! csv_to_sql.rs
//!
//! Converts the cleaned roster CSV into a SQL import script for the
//! convocation eligibility table.
//!
//! Unlike the spreadsheet converter there is no header detection: the CSV
//! must carry the verbatim columns `school`, `registration_no`,
//! `student_name` and `admission_year`. Re-imports refresh the mutable
//! fields of existing registrations (`ON CONFLICT ... DO UPDATE`) but
//! never touch their status.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use convosql::config;
use convosql::emit::{self, ConflictPolicy, ScriptOptions};
use convosql::load::delimited;
use convosql::process;
use convosql::schema;

#[derive(Parser, Debug)]
#[command(
    name = "csv_to_sql",
    about = "Convert the cleaned roster CSV into a convocation SQL import script"
)]
struct Args {
    /// CSV with one row per eligible student.
    #[arg(long, default_value = config::DEFAULT_CSV_INPUT)]
    input: PathBuf,

    /// Path of the generated SQL script.
    #[arg(long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Print the script to stdout instead of writing the output file.
    #[arg(long)]
    stdout: bool,

    /// Fully qualified table the INSERT targets.
    #[arg(long, default_value = config::DEFAULT_TABLE)]
    table: String,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env).init();

    let args = Args::parse();

    // ─── 2) load the roster ──────────────────────────────────────────
    println!("→ Reading CSV: {}", args.input.display());
    let table = delimited::load_csv(&args.input)?;
    println!("✅ Found {} rows", table.rows.len());

    // ─── 3) resolve the fixed columns ────────────────────────────────
    let map = schema::fixed_columns(&table.headers)?;

    // ─── 4) transform rows ───────────────────────────────────────────
    let outcome = process::transform(&table, &map);
    if outcome.students.is_empty() {
        eprintln!("⚠️  No valid student rows found; the script will contain no INSERT.");
    }

    // ─── 5) emit the script ──────────────────────────────────────────
    let opts = ScriptOptions {
        table: args.table.clone(),
        status: config::DEFAULT_STATUS.to_string(),
        source: table.source.clone(),
        conflict: ConflictPolicy::UpdateDetails,
        extended_checks: true,
    };
    let script = emit::build_script(&opts, &outcome.students);
    let dest = (!args.stdout).then_some(args.output.as_path());
    emit::write_output(dest, &script)?;

    if let Some(path) = dest {
        println!("\n✅ SQL file created: {}", path.display());
    }

    println!("\nSummary:");
    println!("   - Rows processed: {}", outcome.processed);
    println!("   - Valid students: {}", outcome.students.len());
    println!("   - Skipped rows:   {}", outcome.skipped);

    if let Some(path) = dest {
        println!("\nNext steps:");
        println!("   1. Review the generated file: {}", path.display());
        println!("   2. Paste its content into the database SQL console");
        println!("   3. Execute it, then run the verification queries at the bottom");
    }

    Ok(())
}

/* ───────────────────────────── tests ───────────────────────────── */

#[cfg(test)]
mod tests {
    use super::*;
    use convosql::load::delimited::load_csv;
    use convosql::schema::fixed_columns;
    use std::fs;

    #[test]
    fn defaults_match_the_documented_configuration() {
        let args = Args::try_parse_from(["csv_to_sql"]).expect("defaults parse");
        assert_eq!(args.input, PathBuf::from(config::DEFAULT_CSV_INPUT));
        assert_eq!(args.output, PathBuf::from(config::DEFAULT_OUTPUT));
        assert_eq!(args.table, config::DEFAULT_TABLE);
        assert!(!args.stdout);
    }

    #[test]
    fn csv_roster_converts_end_to_end() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roster.csv");
        let content = "school,registration_no,student_name,admission_year\n\
                       School of Engineering,2019-SE-001,Jane Doe,2019-08-01\n\
                       School of Law,2020-LW-017,O'Brien,2020\n\
                       School of Law,,Missing Reg,2020\n";
        fs::write(&path, content).expect("write fixture");

        let table = load_csv(&path).expect("load");
        let map = fixed_columns(&table.headers).expect("fixed headers");
        let outcome = process::transform(&table, &map);

        assert_eq!(outcome.processed, 3);
        assert_eq!(outcome.skipped, 1);

        let opts = ScriptOptions {
            table: config::DEFAULT_TABLE.to_string(),
            status: config::DEFAULT_STATUS.to_string(),
            source: table.source.clone(),
            conflict: ConflictPolicy::UpdateDetails,
            extended_checks: true,
        };
        let sql = emit::build_script(&opts, &outcome.students);

        assert!(sql.contains("-- Generated from: roster.csv"));
        assert!(sql.contains("-- Total Students: 2"));
        assert!(sql.contains(
            "('2019-SE-001', 'Jane Doe', 'School of Engineering', '2019', 'not_started')"
        ));
        assert!(sql.contains("('2020-LW-017', 'O''Brien', 'School of Law', '2020', 'not_started')"));
        assert!(sql.contains("ON CONFLICT (registration_no) DO UPDATE SET"));
        assert!(sql.contains("LIMIT 10"));
    }
}
