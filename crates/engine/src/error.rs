use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] configuration::error::ConfigError),

    #[error("Universe error: {0}")]
    Universe(#[from] core_types::CoreError),

    #[error("Could not read universe file '{path}': {source}")]
    UniverseFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] navigator::NavigationError),

    #[error("Presentation error: {0}")]
    Presentation(#[from] presentation::PresentationError),
}

/// The coarse failure classes a view layer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    ShapeMismatch,
    InvalidTransition,
    Configuration,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Configuration(_) | PipelineError::UniverseFile { .. } => {
                ErrorKind::Configuration
            }
            PipelineError::Universe(_) | PipelineError::SerdeJson(_) => ErrorKind::InvalidInput,
            PipelineError::Analytics(analytics::AnalyticsError::InvalidInput(_)) => {
                ErrorKind::InvalidInput
            }
            PipelineError::Analytics(analytics::AnalyticsError::ShapeMismatch(_))
            | PipelineError::Presentation(_) => ErrorKind::ShapeMismatch,
            PipelineError::Navigation(_) => ErrorKind::InvalidTransition,
        }
    }
}
