//! excel_to_sql.rs
//!
//! Converts the passout-batch spreadsheet into a SQL import script for
//! the convocation eligibility table.
//!
//! ── How it works ──
//!  • The first worksheet (or `--sheet`) is read whole; row 1 is the
//!    header.
//!  • Column roles are detected from header keywords (`reg`/`roll`/`id`,
//!    `name`, `school`/`department`, `year`/`admission`); the run aborts
//!    if any of the four stays unresolved.
//!  • Rows are trimmed, quote-escaped and validated; the result is one
//!    reviewable script with `ON CONFLICT DO NOTHING`, so re-imports
//!    leave existing registrations untouched.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use convosql::config;
use convosql::emit::{self, ConflictPolicy, ScriptOptions};
use convosql::load::excel;
use convosql::process;
use convosql::schema;

#[derive(Parser, Debug)]
#[command(
    name = "excel_to_sql",
    about = "Convert a student roster spreadsheet into a convocation SQL import script"
)]
struct Args {
    /// Spreadsheet with one row per eligible student.
    #[arg(long, default_value = config::DEFAULT_EXCEL_INPUT)]
    input: PathBuf,

    /// Worksheet to read; defaults to the first sheet in the workbook.
    #[arg(long)]
    sheet: Option<String>,

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

    // ─── 2) load the workbook ────────────────────────────────────────
    println!("→ Reading spreadsheet: {}", args.input.display());
    let table = excel::load_workbook(&args.input, args.sheet.as_deref())?;
    println!("✅ Found {} rows", table.rows.len());
    println!("Columns: {}", table.headers.join(", "));

    // ─── 3) resolve the column mapping ───────────────────────────────
    let map = schema::detect_columns(&table.headers);
    println!("\nDetected column mapping:");
    for (field, idx) in map.entries() {
        println!("   {} → {field}", table.headers[idx]);
    }
    if !map.is_complete() {
        eprintln!("⚠️  Could not detect all required columns.");
        eprintln!("   Required: registration_no, student_name, school, admission_year");
        eprintln!("   Rename the sheet's headers so each field matches, then rerun.");
    }
    map.ensure_complete()?;

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
        conflict: ConflictPolicy::DoNothing,
        extended_checks: false,
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
