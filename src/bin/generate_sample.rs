use std::path::PathBuf;

use anyhow::{Context, Result};
use csv::Writer;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Lee", "Garcia", "Brown", "Nguyen", "Miller", "Davis", "Khan", "Lopez",
];
const FIRST_NAMES: [&str; 8] = [
    "Ava", "Liam", "Mia", "Noah", "Zoe", "Omar", "Ivy", "Leo",
];
const MAJORS: [&str; 4] = ["Computer Science", "Electrical Engineering", "Math", "Physics"];
const ACTIONS: [&str; 3] = ["Academic Probation", "Warning", "Suspension"];
const GRADUATION_DATES: [&str; 4] = ["05/15/2022", "12/18/2022", "05/14/2023", "12/20/2023"];

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let n_students = 40;

    let students_path = out_dir.join("StudentsMajorsList.csv");
    let gpa_path = out_dir.join("GPAList.csv");
    let graduation_path = out_dir.join("GraduationDatesList.csv");

    let mut students = Writer::from_path(&students_path)
        .with_context(|| format!("creating {}", students_path.display()))?;
    let mut gpas = Writer::from_path(&gpa_path)
        .with_context(|| format!("creating {}", gpa_path.display()))?;
    let mut graduations = Writer::from_path(&graduation_path)
        .with_context(|| format!("creating {}", graduation_path.display()))?;

    students.write_record([
        "student_id",
        "last_name",
        "first_name",
        "major",
        "disciplinary_action",
    ])?;
    gpas.write_record(["student_id", "gpa"])?;
    graduations.write_record(["student_id", "graduation_date"])?;

    let mut n_gpas = 0;
    let mut n_graduated = 0;
    for i in 0..n_students {
        let id = format!("{}", 100_000 + i * 37);
        let action = if rng.chance(0.15) { rng.pick(&ACTIONS) } else { "" };
        students.write_record([
            id.as_str(),
            rng.pick(&LAST_NAMES),
            rng.pick(&FIRST_NAMES),
            rng.pick(&MAJORS),
            action,
        ])?;

        // A few students have no GPA on file.
        if !rng.chance(0.1) {
            let gpa = format!("{:.2}", 2.0 + rng.next_f64() * 2.0);
            gpas.write_record([id.as_str(), gpa.as_str()])?;
            n_gpas += 1;
        }

        if rng.chance(0.3) {
            graduations.write_record([id.as_str(), rng.pick(&GRADUATION_DATES)])?;
            n_graduated += 1;
        }
    }

    students.flush()?;
    gpas.flush()?;
    graduations.flush()?;

    println!(
        "Wrote {n_students} students, {n_gpas} GPAs and {n_graduated} graduation dates to {}",
        out_dir.display()
    );
    Ok(())
}
