use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "STUDENT_ROSTER_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "student_roster.json";

// ---------------------------------------------------------------------------
// Config – input sources and output directory
// ---------------------------------------------------------------------------

/// Where to read the three sources and where to write reports.
///
/// ```json
/// {
///   "students": "data/StudentsMajorsList.csv",
///   "gpas": "data/GPAList.csv",
///   "graduation_dates": "data/GraduationDatesList.csv",
///   "output_dir": "reports"
/// }
/// ```
///
/// Any key left out keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub students: PathBuf,
    pub gpas: PathBuf,
    pub graduation_dates: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            students: PathBuf::from("StudentsMajorsList.csv"),
            gpas: PathBuf::from("GPAList.csv"),
            graduation_dates: PathBuf::from("GraduationDatesList.csv"),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Resolve the config: `$STUDENT_ROSTER_CONFIG`, then
    /// `student_roster.json` in the working directory, then defaults.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(local);
        }
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid config JSON")
    }
}
