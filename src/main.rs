//! stockcast CLI application.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;
use std::path::Path;
use stockcast_config::{load_config, LogFormat};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config_path();
    let config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })?;

    // Setup logging
    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        config.logging.format
    };
    let _guard = setup_logging(&level, format, config.logging.file.as_deref().map(Path::new))?;

    debug!("Loaded configuration for {}", config.app.name);

    // validate-config reports problems itself
    if !matches!(cli.command, Commands::ValidateConfig) {
        config.validate().context("Invalid configuration")?;
    }

    // Execute command
    match cli.command {
        Commands::Predict(args) => cli::commands::predict::run(args, &config).await,
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config).await,
        Commands::Watchlist => cli::commands::watchlist::run(&config).await,
        Commands::ValidateConfig => {
            cli::commands::validate::run(&config, config_path.as_deref()).await
        }
    }
}
