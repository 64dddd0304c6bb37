use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for the dashboard engine.
///
/// Every section is optional in the file; a missing section falls back to the
/// default dashboard behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub correlation: CorrelationSettings,
    #[serde(default)]
    pub synthesis: Synthesis,
    #[serde(default)]
    pub universe: UniverseSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.correlation.max_custom_stocks < 2 {
            return Err(ConfigError::ValidationError(format!(
                "max_custom_stocks must be at least 2 to ever produce a matrix, got {}",
                self.correlation.max_custom_stocks
            )));
        }
        self.synthesis.aggregate.validate("synthesis.aggregate")?;
        self.synthesis.constituent.validate("synthesis.constituent")?;
        Ok(())
    }
}

/// The sampling granularity of the synthetic series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Timeframe {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    /// Number of samples per series: 30 days, 12 weeks or 12 months.
    pub fn series_length(&self) -> usize {
        match self {
            Timeframe::Daily => 30,
            Timeframe::Weekly => 12,
            Timeframe::Monthly => 12,
        }
    }
}

/// How self-correlation cells are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DiagonalDisplayMode {
    /// Show the 1.00 value with its color.
    #[default]
    ShowValue,
    /// Blank value on a fixed opaque (black box) background.
    #[serde(alias = "hide_black")]
    HideOpaque,
    /// Blank value on a transparent background.
    HideTransparent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorrelationSettings {
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub diagonal_mode: DiagonalDisplayMode,
    #[serde(default = "default_max_custom_stocks")]
    pub max_custom_stocks: usize,
    /// Fixed RNG seed for reproducible matrices. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_custom_stocks() -> usize {
    4
}

impl Default for CorrelationSettings {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::default(),
            diagonal_mode: DiagonalDisplayMode::default(),
            max_custom_stocks: default_max_custom_stocks(),
            seed: None,
        }
    }
}

/// Series synthesis knobs, split by the kind of entity being simulated.
#[derive(Debug, Clone, Deserialize)]
pub struct Synthesis {
    /// Used for sector and industry entities.
    #[serde(default = "SynthesisParams::aggregate")]
    pub aggregate: SynthesisParams,
    /// Used for individual stocks (stocks level and custom selection).
    #[serde(default = "SynthesisParams::constituent")]
    pub constituent: SynthesisParams,
}

impl Default for Synthesis {
    fn default() -> Self {
        Self {
            aggregate: SynthesisParams::aggregate(),
            constituent: SynthesisParams::constituent(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SynthesisParams {
    /// How strongly the entity's real performance shows through the noise.
    pub trend_factor: f64,
    /// Width of the uniform noise band, centred on zero.
    pub noise_amplitude: f64,
}

impl SynthesisParams {
    pub fn aggregate() -> Self {
        Self {
            trend_factor: 0.1,
            noise_amplitude: 4.0,
        }
    }

    pub fn constituent() -> Self {
        Self {
            trend_factor: 0.15,
            noise_amplitude: 6.0,
        }
    }

    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if !self.trend_factor.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "{section}.trend_factor must be finite"
            )));
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "{section}.noise_amplitude must be a non-negative number"
            )));
        }
        Ok(())
    }
}

/// Where the stock collection comes from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UniverseSettings {
    pub path: Option<PathBuf>,
    /// Overrides the built-in canonical sector list.
    #[serde(default)]
    pub sectors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}
