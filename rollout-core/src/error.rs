//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum RolloutError {
    /// The agent and the environment disagree on a dimensionality.
    #[error("Dimension mismatch of {what}: agent expects {agent}, environment provides {env}")]
    DimensionMismatch {
        /// Which dimensionality, `"observation"` or `"action"`.
        what: &'static str,

        /// Dimensionality configured in the agent.
        agent: usize,

        /// Dimensionality exposed by the environment.
        env: usize,
    },

    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested sample series does not exist or has no samples.
    #[error("Series key error: {0}")]
    SeriesKeyError(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
