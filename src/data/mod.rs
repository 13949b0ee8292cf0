/// Data layer: record types, loading, and report selection.
///
/// Architecture:
/// ```text
///  students.csv   gpa.csv   graduation.csv
///        │           │            │
///        └───────────┼────────────┘
///                    ▼
///              ┌──────────┐
///              │  loader  │  parse rows → RecordStore
///              └──────────┘
///                    │
///                    ▼
///             ┌─────────────┐
///             │ RecordStore │  students (insertion order), GPAs, dates
///             └─────────────┘
///                    │
///                    ▼
///              ┌──────────┐
///              │  filter  │  select + sort students for each report
///              └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
