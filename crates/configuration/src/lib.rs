use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    Config, CorrelationSettings, DiagonalDisplayMode, LoggingSettings, Synthesis,
    SynthesisParams, Timeframe, UniverseSettings,
};

/// Loads the application configuration from the `config.toml` file.
///
/// The file is optional; every section has a default. Environment variables prefixed
/// with `DASHBOARD_` override file values (e.g. `DASHBOARD_CORRELATION__SEED=7`).
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config.toml").required(false));
    finish(with_environment(builder))
}

/// Loads the configuration from an explicit path. Unlike [`load_config`], the file must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder().add_source(config::File::from(path).required(true));
    finish(with_environment(builder))
}

fn with_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        config::Environment::with_prefix("DASHBOARD")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;
    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}
