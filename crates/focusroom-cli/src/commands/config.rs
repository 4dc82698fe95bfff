use clap::Subcommand;
use focusroom_core::Config;

use super::CliResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting, e.g. "timer.celebration_secs"
    Get {
        /// Dot-separated key: timer.default_mode, timer.celebration_secs,
        /// storage.database_file or logging.filter
        key: String,
    },
    /// Change one setting and write config.toml
    Set {
        /// Dot-separated key
        key: String,
        /// New value ("pomodoro"/"flexible" for timer.default_mode)
        value: String,
    },
    /// Print config.toml as it is stored
    List,
    /// Print the location of config.toml
    Path,
    /// Overwrite config.toml with the defaults
    Reset,
}

pub fn run(action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key} (run `config list` to see all keys)"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::debug!(key = %key, value = %value, "config updated");
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => println!("{}", Config::path()?.display()),
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("{} reset to defaults", Config::path()?.display());
        }
    }
    Ok(())
}
