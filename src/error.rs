// error.rs
// Error types for engine validation and configuration loading.

use thiserror::Error;

use crate::charge::ChargeId;

/// Errors returned by engine mutations and queries.
///
/// Every variant is raised before any state is touched, so a rejected call
/// leaves the engine exactly as it was.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("{field} is not a number: {text:?}")]
    NotANumber { field: &'static str, text: String },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("particle mass must be strictly positive, got {0}")]
    NonPositiveMass(f64),
    #[error("no charge with id {0}")]
    UnknownCharge(ChargeId),
    #[error("field line index {index} out of range (0..{count})")]
    LineIndexOutOfRange { index: usize, count: usize },
    #[error("canvas bounds must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors seen by callers talking to the engine thread.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoopError {
    #[error("engine thread has stopped")]
    Stopped,
    #[error(transparent)]
    Rejected(#[from] EngineError),
}

/// Parse user-supplied text into a finite real number.
pub fn parse_real(field: &'static str, text: &str) -> Result<f64, EngineError> {
    let value: f64 = text.trim().parse().map_err(|_| EngineError::NotANumber {
        field,
        text: text.to_string(),
    })?;
    ensure_finite(field, value)
}

/// Reject NaN and infinities.
#[inline]
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFinite { field, value })
    }
}
