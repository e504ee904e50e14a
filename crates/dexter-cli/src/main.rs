//! Dexter command-line client
//!
//! Usage:
//! ```bash
//! # Fixture backend (default mode)
//! dexter narratives
//! dexter alerts --severity high,medium --start 2025-05-01
//!
//! # Real backend
//! MODE=production VITE_API_BASE_URL=https://dexter.example.org/api/v1 dexter reports
//!
//! # Session
//! dexter login analyst@example.org secret
//! dexter whoami
//! ```

use clap::Parser;
use dexter_cli::{AppConfig, cli::Cli, commands};
use dexter_observability::init_logging;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging)?;
    debug!(mode = ?config.mode, "Configuration loaded");

    let mut stdout = std::io::stdout().lock();
    let success = commands::run(cli.command, &config, &mut stdout).await?;

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
