// src/process/mod.rs
use tracing::{debug, warn};

use crate::error::ImportError;
use crate::load::{Cell, RosterTable};
use crate::schema::{ColumnMap, StudentField};

/// One student ready for SQL embedding. Fields are trimmed and
/// quote-escaped; `admission_year` is already truncated to its year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub registration_no: String,
    pub student_name: String,
    pub school: String,
    pub admission_year: String,
}

/// What one transformation pass produced.
#[derive(Debug)]
pub struct TransformOutcome {
    /// Importable rows, in input order.
    pub students: Vec<StudentRow>,
    /// Data rows seen in the input.
    pub processed: usize,
    /// Rows dropped for an empty mandatory field or a row-level error.
    pub skipped: usize,
}

/// Trim surrounding whitespace and double embedded single quotes so the
/// value can sit inside a SQL string literal.
pub fn clean_text(raw: &str) -> String {
    raw.trim().replace('\'', "''")
}

/// Admission years sometimes arrive as full dates (`2019-08-01`). Anything
/// longer than four characters keeps only its leading four. Operates on the
/// raw trimmed value, before escaping, so a doubled quote can never be cut
/// in half.
pub fn truncate_year(year: &str) -> String {
    if year.chars().count() > 4 {
        year.chars().take(4).collect()
    } else {
        year.to_string()
    }
}

/// Run every data row through extract, clean and validate, dropping and
/// counting the rows that cannot be imported. Never fails the run: a bad
/// row costs exactly that row.
pub fn transform(table: &RosterTable, map: &ColumnMap) -> TransformOutcome {
    let mut students = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;

    for (idx, row) in table.rows.iter().enumerate() {
        let source_row = RosterTable::source_row(idx);
        match transform_row(row, map, source_row) {
            Ok(Some(student)) => students.push(student),
            Ok(None) => {
                debug!(row = source_row, "mandatory field empty, row skipped");
                skipped += 1;
            }
            Err(err) => {
                warn!(row = source_row, "row skipped: {}", err);
                skipped += 1;
            }
        }
    }

    TransformOutcome {
        students,
        processed: table.rows.len(),
        skipped,
    }
}

fn transform_row(
    row: &[Cell],
    map: &ColumnMap,
    source_row: usize,
) -> Result<Option<StudentRow>, ImportError> {
    let registration_no = clean_text(&field_text(row, map, StudentField::RegistrationNo, source_row)?);
    let student_name = clean_text(&field_text(row, map, StudentField::StudentName, source_row)?);
    let school = clean_text(&field_text(row, map, StudentField::School, source_row)?);
    let year = field_text(row, map, StudentField::AdmissionYear, source_row)?;
    let admission_year = clean_text(&truncate_year(year.trim()));

    // A row without a registration number or name cannot be imported.
    if registration_no.is_empty() || student_name.is_empty() {
        return Ok(None);
    }

    Ok(Some(StudentRow {
        registration_no,
        student_name,
        school,
        admission_year,
    }))
}

/// Text of the cell feeding `field`, or empty when the row is too short.
fn field_text(
    row: &[Cell],
    map: &ColumnMap,
    field: StudentField,
    source_row: usize,
) -> Result<String, ImportError> {
    match map.column(field).and_then(|idx| row.get(idx)) {
        None => Ok(String::new()),
        Some(Cell::Text(text)) => Ok(text.clone()),
        Some(Cell::Error(marker)) => Err(ImportError::Row {
            row: source_row,
            message: format!("{field} column holds spreadsheet error {marker}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> ColumnMap {
        let mut map = ColumnMap::default();
        map.insert(StudentField::RegistrationNo, 0);
        map.insert(StudentField::StudentName, 1);
        map.insert(StudentField::School, 2);
        map.insert(StudentField::AdmissionYear, 3);
        map
    }

    fn table(rows: Vec<Vec<Cell>>) -> RosterTable {
        RosterTable {
            source: "roster.xlsx".to_string(),
            headers: vec![
                "Reg No".to_string(),
                "Student Name".to_string(),
                "School".to_string(),
                "Admission Year".to_string(),
            ],
            rows,
        }
    }

    fn text_row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::text(*c)).collect()
    }

    #[test]
    fn clean_text_trims_and_escapes_quotes() {
        assert_eq!(clean_text("  O'Brien  "), "O''Brien");
        assert_eq!(clean_text("St. Mary's School"), "St. Mary''s School");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn truncate_year_keeps_the_leading_four_characters() {
        assert_eq!(truncate_year("2019-08-01"), "2019");
        assert_eq!(truncate_year("2019"), "2019");
        assert_eq!(truncate_year("19"), "19");
        assert_eq!(truncate_year(""), "");
    }

    #[test]
    fn truncate_year_counts_characters_not_bytes() {
        assert_eq!(truncate_year("２０１９年"), "２０１９");
    }

    #[test]
    fn valid_rows_come_out_cleaned_and_in_order() {
        let table = table(vec![
            text_row(&[" 2019-SE-001 ", "Jane Doe", "Engineering", "2019-08-01"]),
            text_row(&["2020-LW-017", "John Roe", "Law", "  2020  "]),
        ]);

        let outcome = transform(&table, &full_map());

        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(
            outcome.students,
            vec![
                StudentRow {
                    registration_no: "2019-SE-001".to_string(),
                    student_name: "Jane Doe".to_string(),
                    school: "Engineering".to_string(),
                    admission_year: "2019".to_string(),
                },
                StudentRow {
                    registration_no: "2020-LW-017".to_string(),
                    student_name: "John Roe".to_string(),
                    school: "Law".to_string(),
                    admission_year: "2020".to_string(),
                },
            ]
        );
    }

    #[test]
    fn quotes_are_escaped_in_every_field() {
        let table = table(vec![text_row(&[
            "A'1",
            "O'Brien",
            "St. Mary's",
            "2019",
        ])]);

        let outcome = transform(&table, &full_map());
        let student = &outcome.students[0];
        assert_eq!(student.registration_no, "A''1");
        assert_eq!(student.student_name, "O''Brien");
        assert_eq!(student.school, "St. Mary''s");
    }

    #[test]
    fn rows_missing_mandatory_fields_are_skipped_not_fatal() {
        let table = table(vec![
            text_row(&["", "Jane Doe", "Engineering", "2019"]),
            text_row(&["2020-LW-017", "   ", "Law", "2020"]),
            text_row(&["2021-ME-044", "Mary Major", "Medicine", "2021"]),
        ]);

        let outcome = transform(&table, &full_map());

        assert_eq!(outcome.processed, 3);
        assert_eq!(outcome.skipped, 2);
        assert_eq!(outcome.students.len(), 1);
        assert_eq!(outcome.students[0].registration_no, "2021-ME-044");
    }

    #[test]
    fn an_error_cell_skips_only_its_row() {
        let table = table(vec![
            vec![
                Cell::text("2019-SE-001"),
                Cell::Error("#N/A".to_string()),
                Cell::text("Engineering"),
                Cell::text("2019"),
            ],
            text_row(&["2020-LW-017", "John Roe", "Law", "2020"]),
        ]);

        let outcome = transform(&table, &full_map());

        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.students.len(), 1);
        assert_eq!(outcome.students[0].registration_no, "2020-LW-017");
    }

    #[test]
    fn short_rows_read_missing_cells_as_empty() {
        let table = table(vec![text_row(&["2019-SE-001", "Jane Doe"])]);

        let outcome = transform(&table, &full_map());

        assert_eq!(outcome.skipped, 0);
        let student = &outcome.students[0];
        assert_eq!(student.school, "");
        assert_eq!(student.admission_year, "");
    }

    #[test]
    fn an_empty_table_produces_an_empty_outcome() {
        let outcome = transform(&table(vec![]), &full_map());
        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.students.is_empty());
    }
}
