//! Error types for the parameter engine.

use thiserror::Error;

/// Errors raised while building a parameter engine or wiring listeners.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// A listener could not be registered on a parameter.
    #[error("listener rejected by parameter '{uid}'")]
    ListenerRejected { uid: String },
    /// Two parameters share a uid.
    #[error("duplicate parameter uid '{uid}'")]
    DuplicateUid { uid: String },
    /// Two distinct uids hash to the same numeric id.
    #[error("parameter uid '{uid}' hashes to the same id as '{other}'")]
    IdCollision { uid: String, other: String },
    /// A parameter was declared with an unusable range.
    #[error("invalid range for parameter '{uid}': min {min}, max {max}")]
    InvalidRange { uid: String, min: f64, max: f64 },
}

/// Result type for parameter engine operations.
pub type ParameterResult<T> = Result<T, ParameterError>;
