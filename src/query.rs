use std::io::{self, BufRead, Write};

use log::debug;

use crate::data::model::{RecordStore, Student};

pub const PROMPT: &str = "Enter a major and GPA (or 'q' to quit): ";

/// Tier 1 band around the requested GPA.
pub const CLOSE_MATCH: f64 = 0.1;
/// Tier 2 band, used only when tier 1 is empty.
pub const WIDE_MATCH: f64 = 0.25;
/// Slack so decimal inputs such as 3.9 vs 3.8 land inside a 0.1 band.
const TOLERANCE_SLACK: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Query parsing
// ---------------------------------------------------------------------------

/// What the user typed on one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Lookup { major: String, gpa: f64 },
    InvalidGpa,
}

/// Parse one input line.
///
/// The line is trimmed; `q` quits. Otherwise the last whitespace-separated
/// token is the GPA and everything before it is the major, compared later
/// verbatim against stored majors.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line == "q" {
        return Command::Quit;
    }
    let Some((major, gpa)) = line.rsplit_once(char::is_whitespace) else {
        return Command::InvalidGpa;
    };
    match gpa.parse::<f64>() {
        Ok(gpa) => Command::Lookup {
            major: major.trim_end().to_string(),
            gpa,
        },
        Err(_) => Command::InvalidGpa,
    }
}

// ---------------------------------------------------------------------------
// Query evaluation
// ---------------------------------------------------------------------------

/// A matched student with the GPA used for matching (0.0 when unknown).
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub student: &'a Student,
    pub gpa: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'a> {
    /// No student has the requested major.
    UnknownMajor,
    /// Tier 1: within [`CLOSE_MATCH`].
    Matches(Vec<Candidate<'a>>),
    /// Tier 2: within [`WIDE_MATCH`].
    AlsoConsider(Vec<Candidate<'a>>),
    /// Tier 3: closest GPA across every student.
    Closest(Candidate<'a>),
}

/// Look up students of `major` near `target`, widening the band until
/// something matches.
pub fn evaluate<'a>(store: &'a RecordStore, major: &str, target: f64) -> Outcome<'a> {
    if !store.has_major(major) {
        return Outcome::UnknownMajor;
    }

    let eligible: Vec<Candidate<'a>> = store
        .students()
        .iter()
        .filter(|s| s.major == major && !s.is_disciplined() && !store.has_graduated(&s.student_id))
        .map(|s| candidate(store, s))
        .collect();

    let within = |band: f64| -> Vec<Candidate<'a>> {
        eligible
            .iter()
            .filter(|c| (c.gpa - target).abs() <= band + TOLERANCE_SLACK)
            .cloned()
            .collect()
    };

    let close = within(CLOSE_MATCH);
    if !close.is_empty() {
        debug!("{major} {target}: {} tier 1 matches", close.len());
        return Outcome::Matches(close);
    }
    let wide = within(WIDE_MATCH);
    if !wide.is_empty() {
        debug!("{major} {target}: {} tier 2 matches", wide.len());
        return Outcome::AlsoConsider(wide);
    }

    // Every student is a fallback candidate regardless of major or eligibility.
    // `min_by` keeps the first of equal distances.
    match store
        .students()
        .iter()
        .map(|s| candidate(store, s))
        .min_by(|a, b| (a.gpa - target).abs().total_cmp(&(b.gpa - target).abs()))
    {
        Some(closest) => {
            debug!("{major} {target}: falling back to {}", closest.student.student_id);
            Outcome::Closest(closest)
        }
        None => Outcome::UnknownMajor,
    }
}

fn candidate<'a>(store: &RecordStore, student: &'a Student) -> Candidate<'a> {
    Candidate {
        student,
        gpa: store.gpa_or_zero(&student.student_id),
    }
}

// ---------------------------------------------------------------------------
// Interactive loop
// ---------------------------------------------------------------------------

/// Prompt, read and answer queries until `q` or end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    store: &RecordStore,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        match parse_command(&line) {
            Command::Quit => break,
            Command::InvalidGpa => {
                writeln!(output, "Invalid GPA. Please enter a valid major and GPA.")?;
            }
            Command::Lookup { major, gpa } => {
                render(&mut output, &evaluate(store, &major, gpa))?;
            }
        }
    }
    Ok(())
}

fn render<W: Write>(output: &mut W, outcome: &Outcome<'_>) -> io::Result<()> {
    match outcome {
        Outcome::UnknownMajor => writeln!(output, "No such student.")?,
        Outcome::Matches(found) => {
            writeln!(output, "\nYour student(s):")?;
            for c in found {
                render_candidate(output, c)?;
            }
        }
        Outcome::AlsoConsider(found) => {
            writeln!(output, "\nNo matching students found within {CLOSE_MATCH} of the requested GPA.")?;
            writeln!(output, "\nYou may also consider:")?;
            for c in found {
                render_candidate(output, c)?;
            }
        }
        Outcome::Closest(c) => {
            writeln!(output, "\nNo matching students found within {CLOSE_MATCH} of the requested GPA.")?;
            writeln!(
                output,
                "\nNo students found within {CLOSE_MATCH} or {WIDE_MATCH} of the requested GPA. Closest match:"
            )?;
            render_candidate(output, c)?;
        }
    }
    Ok(())
}

/// `{:?}` keeps whole-number GPAs readable as `3.0` rather than `3`.
fn render_candidate<W: Write>(output: &mut W, c: &Candidate<'_>) -> io::Result<()> {
    writeln!(
        output,
        "Student ID: {}, First Name: {}, Last Name: {}, GPA: {:?}",
        c.student.student_id, c.student.first_name, c.student.last_name, c.gpa
    )
}
