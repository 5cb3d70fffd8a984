//! Turns tabular student rosters (spreadsheet or delimited exports) into
//! SQL import scripts for the convocation eligibility table.
//!
//! The pipeline is the same for both input kinds: load the file into a
//! [`load::RosterTable`], resolve which column feeds which field
//! ([`schema`]), clean and validate the rows ([`process`]), then render
//! one reviewable script ([`emit`]). Nothing here talks to a database;
//! the output is meant to be pasted into a SQL console.

pub mod config;
pub mod emit;
pub mod error;
pub mod load;
pub mod process;
pub mod schema;
