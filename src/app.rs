use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::data::loader;
use crate::data::model::RecordStore;
use crate::query;
use crate::report::ReportWriter;

// ---------------------------------------------------------------------------
// Application: load → reports → interactive queries
// ---------------------------------------------------------------------------

pub struct StudentRosterApp {
    pub config: Config,
    pub store: RecordStore,
}

impl StudentRosterApp {
    /// Load the three configured sources.
    pub fn load(config: Config) -> Result<Self> {
        let store = loader::load_store(&config.students, &config.gpas, &config.graduation_dates)
            .context("loading student records")?;
        info!(
            "Store holds {} students, {} GPAs, {} graduation dates",
            store.len(),
            store.gpa_count(),
            store.graduation_count()
        );
        Ok(Self { config, store })
    }

    /// Write every report into the output directory, echoing to `echo`.
    pub fn generate_reports<W: Write>(&self, echo: W) -> Result<Vec<PathBuf>> {
        let mut writer = ReportWriter::new(&self.config.output_dir, echo);
        let paths = writer
            .write_all(&self.store)
            .context("generating reports")?;
        info!("Generated {} reports in {}", paths.len(), writer.output_dir().display());
        Ok(paths)
    }

    pub fn interactive_query<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<()> {
        query::run_interactive(&self.store, input, output).context("interactive query")
    }

    /// Full run against the process console.
    pub fn run(&self) -> Result<()> {
        self.generate_reports(std::io::stdout().lock())?;
        self.interactive_query(std::io::stdin().lock(), std::io::stdout().lock())
    }
}
