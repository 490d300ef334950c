//! Analyze command implementation.

use anyhow::{Context, Result};
use stockcast_config::AppConfig;
use stockcast_engine::{analysis_section, PredictionEngine};

use super::prepare;
use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let prepared = prepare(
        &args.history,
        config,
        config.prediction.default_horizon_minutes,
    )
    .await?;

    let analysis = PredictionEngine::new()
        .analyze(&prepared.input, &prepared.series)
        .with_context(|| format!("Analysis failed for {}", prepared.symbol))?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Text => {
            println!("{} @ {:.2}", prepared.symbol, prepared.input.current_price);
            println!();
            print!("{}", analysis_section(&analysis));
        }
    }

    Ok(())
}
