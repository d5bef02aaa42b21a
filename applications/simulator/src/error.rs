/// Simulator error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimulatorError>;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] wave_core::CatalogError),

    #[error("Player error: {0}")]
    Player(#[from] wave_playback::PlayerError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] wave_analytics::AnalyticsError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid timestamp {current} (previous command was at {previous})")]
    InvalidTimestamp { previous: u64, current: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for SimulatorError {
    fn from(err: config::ConfigError) -> Self {
        SimulatorError::Config(err.to_string())
    }
}
