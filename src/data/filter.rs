use std::collections::BTreeMap;

use super::model::{RecordStore, Student};

/// Scholarship candidates need a GPA strictly above this.
pub const SCHOLARSHIP_MIN_GPA: f64 = 3.8;

// ---------------------------------------------------------------------------
// Report selections
// ---------------------------------------------------------------------------
//
// Every selection starts from `RecordStore::students()` (insertion order) and
// uses a stable sort, so equal keys keep the order rows first appeared in.

/// All students, ascending by last name.
pub fn full_roster(store: &RecordStore) -> Vec<&Student> {
    let mut roster: Vec<&Student> = store.students().iter().collect();
    roster.sort_by(|a, b| a.last_name.cmp(&b.last_name));
    roster
}

/// Students partitioned by exact major, each group ascending by id.
/// Majors iterate in sorted order.
pub fn major_rosters(store: &RecordStore) -> BTreeMap<&str, Vec<&Student>> {
    let mut groups: BTreeMap<&str, Vec<&Student>> = BTreeMap::new();
    for student in store.students() {
        groups.entry(student.major.as_str()).or_default().push(student);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.student_id.cmp(&b.student_id));
    }
    groups
}

/// A student qualifies when they have a GPA above [`SCHOLARSHIP_MIN_GPA`],
/// have not graduated and carry no disciplinary action.
pub fn is_scholarship_candidate(store: &RecordStore, student: &Student) -> bool {
    let Some(gpa) = store.gpa(&student.student_id) else {
        return false;
    };
    gpa > SCHOLARSHIP_MIN_GPA
        && !store.has_graduated(&student.student_id)
        && !student.is_disciplined()
}

/// Scholarship candidates, descending by GPA.
pub fn scholarship_candidates(store: &RecordStore) -> Vec<&Student> {
    let mut candidates: Vec<&Student> = store
        .students()
        .iter()
        .filter(|s| is_scholarship_candidate(store, s))
        .collect();
    candidates.sort_by(|a, b| {
        let ga = store.gpa_or_zero(&a.student_id);
        let gb = store.gpa_or_zero(&b.student_id);
        gb.total_cmp(&ga)
    });
    candidates
}

/// Students with a disciplinary action, ascending by raw graduation date
/// text. Students without a date sort first.
pub fn disciplined_students(store: &RecordStore) -> Vec<&Student> {
    let mut disciplined: Vec<&Student> = store
        .students()
        .iter()
        .filter(|s| s.is_disciplined())
        .collect();
    disciplined.sort_by(|a, b| {
        let da = store.graduation_date(&a.student_id).unwrap_or("");
        let db = store.graduation_date(&b.student_id).unwrap_or("");
        da.cmp(db)
    });
    disciplined
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn add(store: &mut RecordStore, id: &str, last: &str, major: &str, action: Option<&str>) {
        store.insert_student(Student::new(
            id,
            last,
            "First",
            major,
            action.map(str::to_string),
        ));
    }

    fn ids(students: &[&Student]) -> Vec<String> {
        students.iter().map(|s| s.student_id.clone()).collect()
    }

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        add(&mut store, "S5", "Miller", "Computer Science", None);
        add(&mut store, "S2", "Adams", "Math", Some("Probation"));
        add(&mut store, "S4", "Miller", "Math", None);
        add(&mut store, "S1", "Baker", "Computer Science", Some("Warning"));
        add(&mut store, "S3", "Chen", "Physics", None);
        add(&mut store, "S6", "Adams", "Physics", None);

        store.insert_gpa("S5", 3.95);
        store.insert_gpa("S2", 3.99);
        store.insert_gpa("S4", 3.85);
        store.insert_gpa("S3", 3.8);
        store.insert_gpa("S6", 3.95);

        store.insert_graduation_date("S1", "2024-05-01");
        store.insert_graduation_date("S6", "2023-12-15");
        store
    }

    #[test]
    fn full_roster_sorted_by_last_name_stable() {
        let store = sample_store();
        let roster = full_roster(&store);
        assert_eq!(ids(&roster), vec!["S2", "S6", "S1", "S3", "S5", "S4"]);
        assert!(roster.windows(2).all(|w| w[0].last_name <= w[1].last_name));
    }

    #[test]
    fn major_rosters_partition_students() {
        let store = sample_store();
        let groups = major_rosters(&store);
        assert_eq!(
            groups.keys().copied().collect::<Vec<_>>(),
            vec!["Computer Science", "Math", "Physics"]
        );
        assert_eq!(ids(&groups["Computer Science"]), vec!["S1", "S5"]);
        assert_eq!(ids(&groups["Math"]), vec!["S2", "S4"]);

        let mut seen = HashSet::new();
        for group in groups.values() {
            for s in group {
                assert!(seen.insert(s.student_id.clone()), "duplicate {}", s.student_id);
            }
        }
        assert_eq!(seen.len(), store.len());
    }

    #[test]
    fn scholarship_requires_every_condition() {
        let store = sample_store();
        // S2 disciplined, S3 exactly 3.8, S6 graduated, S1 no GPA.
        let candidates = scholarship_candidates(&store);
        assert_eq!(ids(&candidates), vec!["S5", "S4"]);
    }

    #[test]
    fn scholarship_ties_keep_insertion_order() {
        let mut store = RecordStore::new();
        add(&mut store, "B", "Two", "CS", None);
        add(&mut store, "A", "One", "CS", None);
        add(&mut store, "C", "Three", "CS", None);
        store.insert_gpa("B", 3.9);
        store.insert_gpa("A", 3.9);
        store.insert_gpa("C", 4.0);
        assert_eq!(ids(&scholarship_candidates(&store)), vec!["C", "B", "A"]);
    }

    #[test]
    fn single_eligible_student() {
        let mut store = RecordStore::new();
        add(&mut store, "S1", "Doe", "CS", None);
        store.insert_gpa("S1", 3.9);
        assert_eq!(ids(&scholarship_candidates(&store)), vec!["S1"]);
    }

    #[test]
    fn disciplined_sorted_by_date_with_missing_first() {
        let mut store = sample_store();
        add(&mut store, "S7", "Young", "Math", Some("Suspension"));
        store.insert_graduation_date("S7", "2022-01-10");
        add(&mut store, "S8", "Zed", "Math", Some("Warning"));

        let disciplined = disciplined_students(&store);
        // S2 and S8 have no date and keep insertion order.
        assert_eq!(ids(&disciplined), vec!["S2", "S8", "S7", "S1"]);
        assert!(disciplined.iter().all(|s| s.is_disciplined()));
    }

    #[test]
    fn empty_store_yields_empty_reports() {
        let store = RecordStore::new();
        assert!(full_roster(&store).is_empty());
        assert!(major_rosters(&store).is_empty());
        assert!(scholarship_candidates(&store).is_empty());
        assert!(disciplined_students(&store).is_empty());
    }
}
