//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use stockcast_config::{AppConfig, Market};

pub async fn run(config: &AppConfig, config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating built-in defaults"),
    }

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!(
        "Default horizon: {} min",
        config.prediction.default_horizon_minutes
    );
    match config.prediction.seed {
        Some(seed) => println!("Seed: {}", seed),
        None => println!("Seed: (entropy)"),
    }
    println!(
        "Watchlist: {} US, {} India",
        config.watchlist_for(Market::Us).count(),
        config.watchlist_for(Market::India).count()
    );

    Ok(())
}
