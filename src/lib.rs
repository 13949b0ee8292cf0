//! Student records: merge students, GPAs and graduation dates from CSV,
//! write roster reports and answer GPA lookups by major.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod query;
pub mod report;

pub use app::StudentRosterApp;
pub use config::Config;
pub use data::model::{RecordStore, Student};
pub use error::{LoadError, ReportError};
