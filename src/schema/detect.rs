// src/schema/detect.rs
use tracing::debug;

use super::{ColumnMap, StudentField};

/// Keyword rules for header detection, in priority order:
///  1) `reg`, `roll` or `id`        → registration_no
///  2) `name`                       → student_name
///  3) `school` or `department`     → school
///  4) `year` or `admission`        → admission_year
///
/// For a single header the first matching rule decides. Across headers a
/// later match for the same field replaces an earlier one.
const HEADER_RULES: &[(&[&str], StudentField)] = &[
    (&["reg", "roll", "id"], StudentField::RegistrationNo),
    (&["name"], StudentField::StudentName),
    (&["school", "department"], StudentField::School),
    (&["year", "admission"], StudentField::AdmissionYear),
];

/// Decide which field a single header supplies, if any. Matching is a
/// case-insensitive substring check on the trimmed header.
fn classify(header: &str) -> Option<StudentField> {
    let lowered = header.to_lowercase();
    let name = lowered.trim();
    for (keywords, field) in HEADER_RULES {
        if keywords.iter().any(|keyword| name.contains(keyword)) {
            return Some(*field);
        }
    }
    None
}

/// Resolve the column mapping from spreadsheet headers.
///
/// Returns whatever was detected, complete or not, so callers can show the
/// result before [`ColumnMap::ensure_complete`] decides whether to go on.
pub fn detect_columns(headers: &[String]) -> ColumnMap {
    let mut map = ColumnMap::default();
    for (idx, header) in headers.iter().enumerate() {
        match classify(header) {
            Some(field) => {
                if let Some(previous) = map.column(field) {
                    debug!(
                        column = %header,
                        field = %field,
                        previous,
                        "header replaces an earlier match"
                    );
                }
                map.insert(field, idx);
            }
            None => debug!(column = %header, "header matched no field, ignored"),
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn maps_the_usual_export_headers() {
        let map = detect_columns(&headers(&[
            "Registration No",
            "Student Name",
            "School",
            "Admission Year",
        ]));

        assert!(map.is_complete());
        assert_eq!(map.column(StudentField::RegistrationNo), Some(0));
        assert_eq!(map.column(StudentField::StudentName), Some(1));
        assert_eq!(map.column(StudentField::School), Some(2));
        assert_eq!(map.column(StudentField::AdmissionYear), Some(3));
    }

    #[test]
    fn rule_order_decides_within_one_header() {
        // "School ID" matches the registration rule before the school rule.
        let map = detect_columns(&headers(&["School ID"]));
        assert_eq!(map.column(StudentField::RegistrationNo), Some(0));
        assert_eq!(map.column(StudentField::School), None);
    }

    #[test]
    fn later_header_replaces_an_earlier_match() {
        let map = detect_columns(&headers(&[
            "Reg No",
            "Student Name",
            "Name",
            "Department",
            "Year",
        ]));
        assert_eq!(map.column(StudentField::StudentName), Some(2));
        assert_eq!(map.column(StudentField::School), Some(3));
    }

    #[test]
    fn matching_ignores_case_and_surrounding_space() {
        let map = detect_columns(&headers(&[
            "  REGISTRATION no ",
            "student NAME",
            "SCHOOL",
            " Admission YEAR",
        ]));
        assert!(map.is_complete());
    }

    #[test]
    fn unrelated_headers_are_ignored() {
        let map = detect_columns(&headers(&["Phone", "Mobile", "Due Fees"]));
        assert!(map.entries().is_empty());
    }

    #[test]
    fn incomplete_detection_reports_the_missing_fields() {
        let map = detect_columns(&headers(&["Reg No", "Student Name", "School"]));
        let err = map.ensure_complete().unwrap_err();
        assert!(matches!(
            err,
            ImportError::MappingIncomplete { ref missing }
                if missing == &[StudentField::AdmissionYear]
        ));
    }
}
