// src/schema/mod.rs
use std::collections::HashMap;
use std::fmt;

use crate::error::ImportError;

pub mod detect;

pub use detect::detect_columns;

/// The four attributes every imported row must carry, whatever the input
/// file calls its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    RegistrationNo,
    StudentName,
    School,
    AdmissionYear,
}

impl StudentField {
    pub const ALL: [StudentField; 4] = [
        StudentField::RegistrationNo,
        StudentField::StudentName,
        StudentField::School,
        StudentField::AdmissionYear,
    ];

    /// Column name in the target table. The delimited format must carry
    /// these names verbatim in its header.
    pub fn column_name(&self) -> &'static str {
        match self {
            StudentField::RegistrationNo => "registration_no",
            StudentField::StudentName => "student_name",
            StudentField::School => "school",
            StudentField::AdmissionYear => "admission_year",
        }
    }
}

impl fmt::Display for StudentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Which input column index supplies each field.
#[derive(Debug, Default, Clone)]
pub struct ColumnMap {
    by_field: HashMap<StudentField, usize>,
}

impl ColumnMap {
    /// Map `field` to `column`, replacing any earlier mapping.
    pub fn insert(&mut self, field: StudentField, column: usize) {
        self.by_field.insert(field, column);
    }

    pub fn column(&self, field: StudentField) -> Option<usize> {
        self.by_field.get(&field).copied()
    }

    /// Fields no header resolved to, in declaration order.
    pub fn missing(&self) -> Vec<StudentField> {
        StudentField::ALL
            .iter()
            .copied()
            .filter(|field| !self.by_field.contains_key(field))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Structural check before transforming: every field must be mapped.
    pub fn ensure_complete(&self) -> Result<(), ImportError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MappingIncomplete { missing })
        }
    }

    /// Mapped `(field, column index)` pairs in field declaration order,
    /// for operator printouts.
    pub fn entries(&self) -> Vec<(StudentField, usize)> {
        StudentField::ALL
            .iter()
            .filter_map(|field| self.by_field.get(field).map(|idx| (*field, *idx)))
            .collect()
    }
}

/// Resolve the delimited format's fixed header contract: all four column
/// names must appear verbatim, in any order. A missing name fails the run
/// rather than skipping rows.
pub fn fixed_columns(headers: &[String]) -> Result<ColumnMap, ImportError> {
    let mut map = ColumnMap::default();
    for field in StudentField::ALL {
        let name = field.column_name();
        match headers.iter().position(|h| h.as_str() == name) {
            Some(idx) => map.insert(field, idx),
            None => {
                return Err(ImportError::MissingColumn {
                    column: name.to_string(),
                })
            }
        }
    }
    Ok(map)
}
