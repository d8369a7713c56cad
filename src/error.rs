//! Errors reported by the interpreter.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretError {
    /// Durations are derived as `base / speed`, so speed must be positive.
    #[error("command {index} ({kind} on {target:?}): speed must be a positive number, got {speed}")]
    InvalidSpeed {
        index: usize,
        kind: String,
        target: String,
        speed: f64,
    },

    /// Only raised when strict animation kinds are enabled in the config.
    #[error("command {index}: unknown animation kind {kind:?} on {target:?}")]
    UnknownAnimationKind {
        index: usize,
        kind: String,
        target: String,
    },

    /// Sampling would produce more frames than the configured limit.
    #[error("sampling needs {frames} frames, more than the limit of {limit}")]
    TooManyFrames { frames: f64, limit: usize },
}
