//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ip_collector` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All pipeline functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ip_collector::initialization::init_logger_with;
use ip_collector::{run_pipeline, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present, so IPINFO_TOKEN can
    // live there without being exported manually.
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_pipeline(config).await {
        Ok(report) => {
            match report.output {
                Some(path) => println!(
                    "Saved {} address{} ({} resolved, {} unresolved) to {} in {:.1}s",
                    report.total_addresses,
                    if report.total_addresses == 1 { "" } else { "es" },
                    report.resolved,
                    report.unresolved,
                    path.display(),
                    report.elapsed_seconds
                ),
                None => println!(
                    "No addresses collected ({} source{} failed); nothing written",
                    report.pages_failed,
                    if report.pages_failed == 1 { "" } else { "s" }
                ),
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ip_collector error: {:#}", e);
            process::exit(1);
        }
    }
}
