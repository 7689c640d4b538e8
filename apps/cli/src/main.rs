//! # Online Store Shell Entry Point
//!
//! ## Startup Sequence
//! 1. Load `.env` (the key-value settings source)
//! 2. Parse flags and resolve settings
//! 3. Initialize tracing
//! 4. Open the database and run migrations - FATAL on failure
//! 5. Run the menu loop until exit
//! 6. Close the pool
//!
//! After startup, no error terminates the process: operation failures
//! are printed and the menu loop continues.

mod config;
mod shell;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Settings};
use crate::shell::Shell;
use store_db::{Database, DbConfig};

#[tokio::main]
async fn main() {
    // Missing .env is fine; flags and defaults still apply.
    dotenvy::dotenv().ok();

    let settings = Settings::resolve(Cli::parse());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.clone())),
        )
        .init();

    tracing::debug!(
        database = %settings.database_path.display(),
        "Settings resolved"
    );

    // Unopenable database (or failed migration) is the one fatal
    // condition: abort startup with a diagnostic.
    let db = match Database::new(DbConfig::new(&settings.database_path)).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!(
                "fatal: cannot open database {}: {e}",
                settings.database_path.display()
            );
            std::process::exit(1);
        }
    };

    Shell::new(db.clone()).run().await;

    db.close().await;
    println!("Goodbye!");
}
