use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use serde::Deserialize;

use super::model::{RecordStore, Student};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Row layouts
// ---------------------------------------------------------------------------

/// `student_id,last_name,first_name,major,disciplinary_action`
#[derive(Debug, Deserialize)]
struct StudentRow {
    student_id: String,
    last_name: String,
    first_name: String,
    major: String,
    disciplinary_action: String,
}

/// `student_id,gpa` – the GPA stays text until we parse it ourselves so the
/// error can carry the offending value.
#[derive(Debug, Deserialize)]
struct GpaRow {
    student_id: String,
    gpa: String,
}

/// `student_id,graduation_date`
#[derive(Debug, Deserialize)]
struct GraduationRow {
    student_id: String,
    graduation_date: String,
}

const STUDENT_FIELDS: usize = 5;
const GPA_FIELDS: usize = 2;
const GRADUATION_FIELDS: usize = 2;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load all three sources into a fresh store: students, then GPAs, then
/// graduation dates.
pub fn load_store(
    students: &Path,
    gpas: &Path,
    graduation_dates: &Path,
) -> Result<RecordStore, LoadError> {
    let mut store = RecordStore::new();
    load_all(&mut store, students, gpas, graduation_dates)?;
    Ok(store)
}

/// Load the three sources into `store` in order. A failure part-way leaves
/// the earlier loads in place.
pub fn load_all(
    store: &mut RecordStore,
    students: &Path,
    gpas: &Path,
    graduation_dates: &Path,
) -> Result<(), LoadError> {
    load_students(store, students)?;
    load_gpas(store, gpas)?;
    load_graduation_dates(store, graduation_dates)?;
    Ok(())
}

pub fn load_students(store: &mut RecordStore, path: &Path) -> Result<usize, LoadError> {
    let rows = read_students(store, open(path)?, &path.display().to_string())?;
    info!("Loaded {rows} student rows from {}", path.display());
    Ok(rows)
}

pub fn load_gpas(store: &mut RecordStore, path: &Path) -> Result<usize, LoadError> {
    let rows = read_gpas(store, open(path)?, &path.display().to_string())?;
    info!("Loaded {rows} GPA rows from {}", path.display());
    Ok(rows)
}

pub fn load_graduation_dates(store: &mut RecordStore, path: &Path) -> Result<usize, LoadError> {
    let rows = read_graduation_dates(store, open(path)?, &path.display().to_string())?;
    info!("Loaded {rows} graduation rows from {}", path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Reader-generic loaders
// ---------------------------------------------------------------------------

/// Read a students CSV (header row first) from any reader.
/// `source_name` only labels errors.
pub fn read_students<R: Read>(
    store: &mut RecordStore,
    reader: R,
    source_name: &str,
) -> Result<usize, LoadError> {
    for_each_row(reader, source_name, STUDENT_FIELDS, |record, _line| {
        let row: StudentRow = deserialize(record, source_name)?;
        let action = Some(row.disciplinary_action);
        store.insert_student(Student::new(
            row.student_id,
            row.last_name,
            row.first_name,
            row.major,
            action,
        ));
        Ok(())
    })
}

pub fn read_gpas<R: Read>(
    store: &mut RecordStore,
    reader: R,
    source_name: &str,
) -> Result<usize, LoadError> {
    for_each_row(reader, source_name, GPA_FIELDS, |record, line| {
        let row: GpaRow = deserialize(record, source_name)?;
        let gpa = row
            .gpa
            .trim()
            .parse::<f64>()
            .map_err(|source| LoadError::Parse {
                source_name: source_name.to_string(),
                line,
                value: row.gpa.clone(),
                source,
            })?;
        store.insert_gpa(row.student_id, gpa);
        Ok(())
    })
}

pub fn read_graduation_dates<R: Read>(
    store: &mut RecordStore,
    reader: R,
    source_name: &str,
) -> Result<usize, LoadError> {
    for_each_row(reader, source_name, GRADUATION_FIELDS, |record, _line| {
        let row: GraduationRow = deserialize(record, source_name)?;
        store.insert_graduation_date(row.student_id, row.graduation_date);
        Ok(())
    })
}

// -- helpers --

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Skip the header, check every data row has exactly `expected` fields and
/// hand it to `on_row` with its line number. Returns the number of rows.
fn for_each_row<R, F>(
    reader: R,
    source_name: &str,
    expected: usize,
    mut on_row: F,
) -> Result<usize, LoadError>
where
    R: Read,
    F: FnMut(&StringRecord, u64) -> Result<(), LoadError>,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = 0;
    for result in csv_reader.records() {
        let record = result.map_err(|source| LoadError::Csv {
            source_name: source_name.to_string(),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != expected {
            return Err(LoadError::MalformedRow {
                source_name: source_name.to_string(),
                line,
                expected,
                found: record.len(),
            });
        }

        on_row(&record, line)?;
        rows += 1;
    }
    debug!("{source_name}: {rows} data rows");
    Ok(rows)
}

fn deserialize<T>(record: &StringRecord, source_name: &str) -> Result<T, LoadError>
where
    T: for<'de> Deserialize<'de>,
{
    record.deserialize(None).map_err(|source| LoadError::Csv {
        source_name: source_name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDENTS: &str = "\
student_id,last_name,first_name,major,disciplinary_action
S1,Doe,Jane,CS,
S2,Roe,Rick,Math,Academic probation
";

    fn find<'a>(store: &'a RecordStore, id: &str) -> &'a Student {
        store
            .students()
            .iter()
            .find(|s| s.student_id == id)
            .unwrap()
    }

    #[test]
    fn reads_students_and_skips_header() {
        let mut store = RecordStore::new();
        let rows = read_students(&mut store, STUDENTS.as_bytes(), "students").unwrap();
        assert_eq!(rows, 2);
        assert_eq!(store.len(), 2);

        let jane = find(&store, "S1");
        assert_eq!(jane.first_name, "Jane");
        assert_eq!(jane.disciplinary_action, None);

        let rick = find(&store, "S2");
        assert_eq!(rick.disciplinary_action.as_deref(), Some("Academic probation"));
    }

    #[test]
    fn later_student_row_wins() {
        let text = "id,l,f,m,a\nS1,Doe,Jane,CS,\nS1,Doe,Janet,Biology,Warning\n";
        let mut store = RecordStore::new();
        read_students(&mut store, text.as_bytes(), "students").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(find(&store, "S1").first_name, "Janet");
    }

    #[test]
    fn short_student_row_is_malformed() {
        let text = "id,l,f,m,a\nS1,Doe,Jane,CS,\nS2,Roe,Rick\n";
        let mut store = RecordStore::new();
        let err = read_students(&mut store, text.as_bytes(), "students").unwrap_err();
        match err {
            LoadError::MalformedRow {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 5);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Rows before the bad one stay loaded.
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reads_gpas_with_surrounding_whitespace() {
        let text = "student_id,gpa\nS1, 3.9\nS2,2.5\nX7,4.2\n";
        let mut store = RecordStore::new();
        assert_eq!(read_gpas(&mut store, text.as_bytes(), "gpa").unwrap(), 3);
        assert_eq!(store.gpa("S1"), Some(3.9));
        // No range validation and no cross-check against students.
        assert_eq!(store.gpa("X7"), Some(4.2));
    }

    #[test]
    fn non_numeric_gpa_is_parse_error() {
        let text = "student_id,gpa\nS1,three\n";
        let mut store = RecordStore::new();
        let err = read_gpas(&mut store, text.as_bytes(), "gpa").unwrap_err();
        match err {
            LoadError::Parse { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "three");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extra_gpa_field_is_malformed() {
        let text = "student_id,gpa\nS1,3.1,extra\n";
        let mut store = RecordStore::new();
        let err = read_gpas(&mut store, text.as_bytes(), "gpa").unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { found: 3, .. }));
    }

    #[test]
    fn reads_graduation_dates_verbatim() {
        let text = "student_id,graduation_date\nS1,05/15/2023\nS2,  spring 2024\n";
        let mut store = RecordStore::new();
        read_graduation_dates(&mut store, text.as_bytes(), "grad").unwrap();
        assert_eq!(store.graduation_date("S1"), Some("05/15/2023"));
        assert_eq!(store.graduation_date("S2"), Some("  spring 2024"));
    }

    #[test]
    fn header_only_source_is_empty() {
        let mut store = RecordStore::new();
        let rows = read_graduation_dates(&mut store, "student_id,graduation_date\n".as_bytes(), "g")
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[test]
    fn loads_from_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let students = dir.path().join("students.csv");
        let gpas = dir.path().join("gpa.csv");
        let grads = dir.path().join("grad.csv");
        std::fs::write(&students, STUDENTS).unwrap();
        std::fs::write(&gpas, "student_id,gpa\nS1,3.9\n").unwrap();
        std::fs::write(&grads, "student_id,graduation_date\nS2,2023-05-01\n").unwrap();

        let store = load_store(&students, &gpas, &grads).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.gpa("S1"), Some(3.9));
        assert!(store.has_graduated("S2"));
    }

    #[test]
    fn missing_file_fails_without_rolling_back() {
        let dir = tempfile::tempdir().unwrap();
        let students = dir.path().join("students.csv");
        std::fs::write(&students, STUDENTS).unwrap();

        let mut store = RecordStore::new();
        let err = load_all(
            &mut store,
            &students,
            &dir.path().join("missing.csv"),
            &dir.path().join("grad.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert_eq!(store.len(), 2);
    }
}
