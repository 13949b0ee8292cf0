use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use log::{info, warn};
use serde::Serialize;

use crate::data::filter;
use crate::data::model::{RecordStore, Student};
use crate::error::ReportError;

/// Column titles shared by every report.
pub const HEADER: [&str; 5] = [
    "Student ID",
    "Last Name",
    "First Name",
    "Major",
    "Disciplinary Action",
];

// ---------------------------------------------------------------------------
// Report kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    FullRoster,
    Major(String),
    ScholarshipCandidates,
    DisciplinedStudents,
}

/// Characters that cannot appear in a file name on common platforms.
const UNSAFE_FILE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

impl ReportKind {
    /// Output file name. Per-major names drop every whitespace character and
    /// replace path separators and other unsafe characters with `_`, so the
    /// file always lands directly in the output directory.
    pub fn file_name(&self) -> String {
        match self {
            ReportKind::FullRoster => "FullRoster.csv".to_string(),
            ReportKind::Major(major) => {
                let compact: String = major
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| {
                        if UNSAFE_FILE_CHARS.contains(&c) || c.is_control() {
                            '_'
                        } else {
                            c
                        }
                    })
                    .collect();
                format!("{compact}Students.csv")
            }
            ReportKind::ScholarshipCandidates => "ScholarshipCandidates.csv".to_string(),
            ReportKind::DisciplinedStudents => "DisciplinedStudents.csv".to_string(),
        }
    }
}

/// One report: which kind it is and its students in output order.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub kind: ReportKind,
    pub students: Vec<&'a Student>,
}

/// Build every report in output order: full roster, one per major (sorted
/// by major), scholarship candidates, disciplined students.
pub fn build_reports(store: &RecordStore) -> Vec<Report<'_>> {
    let mut reports = vec![Report {
        kind: ReportKind::FullRoster,
        students: filter::full_roster(store),
    }];
    reports.extend(
        filter::major_rosters(store)
            .into_iter()
            .map(|(major, students)| Report {
                kind: ReportKind::Major(major.to_string()),
                students,
            }),
    );
    reports.push(Report {
        kind: ReportKind::ScholarshipCandidates,
        students: filter::scholarship_candidates(store),
    });
    reports.push(Report {
        kind: ReportKind::DisciplinedStudents,
        students: filter::disciplined_students(store),
    });
    reports
}

// ---------------------------------------------------------------------------
// Row encoding
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    student_id: &'a str,
    last_name: &'a str,
    first_name: &'a str,
    major: &'a str,
    disciplinary_action: &'a str,
}

impl<'a> From<&'a Student> for ReportRow<'a> {
    fn from(s: &'a Student) -> Self {
        ReportRow {
            student_id: &s.student_id,
            last_name: &s.last_name,
            first_name: &s.first_name,
            major: &s.major,
            disciplinary_action: s.action_label(),
        }
    }
}

/// Write the header and one row per student as CSV.
pub fn write_rows<W: Write>(sink: W, students: &[&Student]) -> Result<(), csv::Error> {
    // The header is written explicitly so empty reports still carry it.
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);
    writer.write_record(HEADER)?;
    for student in students {
        writer.serialize(ReportRow::from(*student))?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// ReportWriter – file output plus console echo
// ---------------------------------------------------------------------------

/// Writes reports into `output_dir` and echoes each one to `echo`.
pub struct ReportWriter<E: Write> {
    output_dir: PathBuf,
    echo: E,
}

impl<E: Write> ReportWriter<E> {
    pub fn new(output_dir: impl Into<PathBuf>, echo: E) -> Self {
        ReportWriter {
            output_dir: output_dir.into(),
            echo,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one report to `file_name` in the output directory, then echo
    /// the same rows. Returns the file path.
    pub fn write(&mut self, report: &Report<'_>, file_name: &str) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join(file_name);

        let file = File::create(&path).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        write_rows(BufWriter::new(file), &report.students).map_err(|source| {
            ReportError::Csv {
                path: path.clone(),
                source,
            }
        })?;
        info!("Wrote {} rows to {}", report.students.len(), path.display());

        writeln!(self.echo, "Printing data for {file_name}:").map_err(|source| {
            ReportError::Io {
                path: path.clone(),
                source,
            }
        })?;
        write_rows(&mut self.echo, &report.students).map_err(|source| ReportError::Csv {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Build and write every report for `store`, creating the output
    /// directory if needed. Every report gets its own file: when two majors
    /// reduce to the same name, later ones get a `-2`, `-3`, ... suffix.
    pub fn write_all(&mut self, store: &RecordStore) -> Result<Vec<PathBuf>, ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        let mut used = HashSet::new();
        build_reports(store)
            .iter()
            .map(|report| {
                let file_name = unique_file_name(report.kind.file_name(), &mut used);
                self.write(report, &file_name)
            })
            .collect()
    }
}

/// Return `name`, or the first free `<stem>-N.csv` when it is already taken.
fn unique_file_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let stem = name.strip_suffix(".csv").unwrap_or(&name);
    let mut n = 2;
    loop {
        let candidate = format!("{stem}-{n}.csv");
        if used.insert(candidate.clone()) {
            warn!("Report file {name} already used, writing {candidate}");
            return candidate;
        }
        n += 1;
    }
}
