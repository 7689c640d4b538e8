//! # Configuration
//!
//! Settings resolution for the shell binary.
//!
//! ## Sources (priority order)
//! 1. Command-line flags (`--database`)
//! 2. Environment / `.env` file (`STORE_DATABASE`), loaded via dotenvy
//! 3. Defaults (`store.db` in the working directory)
//!
//! The resolved [`Settings`] value is constructed once in `main` and
//! passed down explicitly; nothing reads configuration ambiently after
//! startup.

use clap::Parser;
use std::path::PathBuf;

/// Environment key for the database path.
const ENV_DATABASE: &str = "STORE_DATABASE";

/// Command-line flags.
#[derive(Debug, Parser)]
#[command(
    name = "store-cli",
    about = "Interactive inventory and order management console"
)]
pub struct Cli {
    /// Path to the SQLite database file (overrides STORE_DATABASE)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Log filter, e.g. "info" or "store_db=debug"
    #[arg(long, default_value = "warn")]
    pub log: String,
}

/// Resolved application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub log_filter: String,
}

impl Settings {
    /// Merges flags over the environment over defaults.
    pub fn resolve(cli: Cli) -> Self {
        let database_path = cli
            .database
            .or_else(|| std::env::var(ENV_DATABASE).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("store.db"));

        Settings {
            database_path,
            log_filter: cli.log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_takes_priority() {
        let cli = Cli {
            database: Some(PathBuf::from("/tmp/override.db")),
            log: "warn".to_string(),
        };
        let settings = Settings::resolve(cli);
        assert_eq!(settings.database_path, PathBuf::from("/tmp/override.db"));
    }

    #[test]
    fn defaults_to_store_db() {
        // Only meaningful when the env key is unset, as in a clean test run.
        if std::env::var(ENV_DATABASE).is_err() {
            let cli = Cli {
                database: None,
                log: "warn".to_string(),
            };
            let settings = Settings::resolve(cli);
            assert_eq!(settings.database_path, PathBuf::from("store.db"));
        }
    }
}
