//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, LogFormat, LoggingConfig, Market, PredictionSettings, ValidationError,
    WatchlistEntry,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Environment prefix; `STOCKCAST__PREDICTION__SEED=7` overrides `prediction.seed`.
pub const ENV_PREFIX: &str = "STOCKCAST";

/// Load configuration from an optional file and the environment.
///
/// Without a file the built-in defaults apply, still subject to environment
/// overrides.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
