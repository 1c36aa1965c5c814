use thiserror::Error;

/// Everything that can go wrong inside a tick. None of these abort the
/// loop: each is logged and reduced to a display update where it occurs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StationError {
    #[error("sensor not ready")]
    SensorNotReady,
    #[error("catalog unavailable")]
    CatalogUnavailable,
    #[error("no confirmed product selection")]
    NoSelection,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("catalog parse error: {0}")]
    Parse(String),
    #[error("hardware error: {0}")]
    Hardware(String),
    #[error("configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing weight sensor")]
    MissingSensor,
    #[error("missing selector control")]
    MissingControl,
    #[error("missing report sink")]
    MissingSink,
    #[error("missing wall clock")]
    MissingWallClock,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
