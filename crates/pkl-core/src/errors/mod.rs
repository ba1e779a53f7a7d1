//! Error handling for PKL.
//! One error enum per subsystem, `thiserror` only.
//!
//! None of these ever escape the classification pipeline: config problems
//! are repaired, engine failures collapse to "no result" at the adapter.

pub mod config_error;
pub mod engine_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;

/// Top-level error aggregating subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PklError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Analysis engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used across the workspace.
pub type PklResult<T> = Result<T, PklError>;
