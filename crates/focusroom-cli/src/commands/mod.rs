pub mod config;
pub mod stats;
pub mod subject;
pub mod timer;

use focusroom_core::{AppOptions, Config, Database, FocusApp};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the app over the configured database.
pub fn open_app(config: &Config) -> Result<FocusApp, Box<dyn std::error::Error>> {
    let db = Database::open(&config.storage.database_file)?;
    Ok(FocusApp::open(db, AppOptions::from(config)))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
