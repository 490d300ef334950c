//! Predict command implementation.

use anyhow::{Context, Result};
use stockcast_config::AppConfig;
use stockcast_engine::{ForecastReport, PredictionEngine, SeededRandom};
use tracing::info;

use super::prepare;
use crate::cli::{OutputFormat, PredictArgs};

pub async fn run(args: PredictArgs, config: &AppConfig) -> Result<()> {
    let horizon = args
        .horizon
        .unwrap_or(config.prediction.default_horizon_minutes);
    let prepared = prepare(&args.history, config, horizon).await?;

    let mut rng = match args.seed.or(config.prediction.seed) {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            SeededRandom::new(seed)
        }
        None => SeededRandom::from_entropy(),
    };

    let engine = PredictionEngine::new();
    let result = engine
        .predict(&prepared.input, &prepared.series, &mut rng)
        .with_context(|| format!("Prediction failed for {}", prepared.symbol))?;

    info!(
        "{}: {:.2} -> {:.2} ({}, confidence {:.2})",
        prepared.symbol,
        prepared.input.current_price,
        result.predicted_price,
        result.trend,
        result.confidence
    );

    let mut report = ForecastReport::new(&prepared.symbol, prepared.input, result);
    if args.explain {
        report = report.with_analysis(engine.analyze(&prepared.input, &prepared.series)?);
    }

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    Ok(())
}
