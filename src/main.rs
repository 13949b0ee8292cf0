use anyhow::Result;
use student_roster::{Config, StudentRosterApp};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load()?;
    let app = StudentRosterApp::load(config)?;
    app.run()
}
