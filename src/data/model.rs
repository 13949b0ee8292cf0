use std::collections::HashMap;

/// Rendered in place of an absent disciplinary action.
pub const NO_ACTION: &str = "None";

// ---------------------------------------------------------------------------
// Student – one row of the students source
// ---------------------------------------------------------------------------

/// A student profile. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub student_id: String,
    pub last_name: String,
    pub first_name: String,
    pub major: String,
    /// `None` when the source cell was empty.
    pub disciplinary_action: Option<String>,
}

impl Student {
    pub fn new(
        student_id: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        major: impl Into<String>,
        disciplinary_action: Option<String>,
    ) -> Self {
        Student {
            student_id: student_id.into(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            major: major.into(),
            disciplinary_action: disciplinary_action.filter(|a| !a.is_empty()),
        }
    }

    pub fn is_disciplined(&self) -> bool {
        self.disciplinary_action.is_some()
    }

    /// The action text, or [`NO_ACTION`].
    pub fn action_label(&self) -> &str {
        self.disciplinary_action.as_deref().unwrap_or(NO_ACTION)
    }
}

// ---------------------------------------------------------------------------
// RecordStore – the three joined datasets
// ---------------------------------------------------------------------------

/// In-memory holder of students, GPAs and graduation dates, keyed by id.
///
/// Students keep their first-seen position: re-inserting an id replaces the
/// profile in place, so every stable sort downstream breaks ties by the
/// order rows first appeared in the source.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    students: Vec<Student>,
    positions: HashMap<String, usize>,
    gpas: HashMap<String, f64>,
    graduation_dates: HashMap<String, String>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a student profile (last write wins).
    pub fn insert_student(&mut self, student: Student) {
        match self.positions.get(&student.student_id) {
            Some(&pos) => self.students[pos] = student,
            None => {
                self.positions
                    .insert(student.student_id.clone(), self.students.len());
                self.students.push(student);
            }
        }
    }

    pub fn insert_gpa(&mut self, student_id: impl Into<String>, gpa: f64) {
        self.gpas.insert(student_id.into(), gpa);
    }

    pub fn insert_graduation_date(
        &mut self,
        student_id: impl Into<String>,
        date: impl Into<String>,
    ) {
        self.graduation_dates.insert(student_id.into(), date.into());
    }

    /// All students in insertion order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn gpa(&self, student_id: &str) -> Option<f64> {
        self.gpas.get(student_id).copied()
    }

    /// GPA with unknown values counted as 0.0.
    pub fn gpa_or_zero(&self, student_id: &str) -> f64 {
        self.gpa(student_id).unwrap_or(0.0)
    }

    pub fn graduation_date(&self, student_id: &str) -> Option<&str> {
        self.graduation_dates.get(student_id).map(String::as_str)
    }

    pub fn has_graduated(&self, student_id: &str) -> bool {
        self.graduation_dates.contains_key(student_id)
    }

    pub fn has_major(&self, major: &str) -> bool {
        self.students.iter().any(|s| s.major == major)
    }

    pub fn gpa_count(&self) -> usize {
        self.gpas.len()
    }

    pub fn graduation_count(&self) -> usize {
        self.graduation_dates.len()
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
