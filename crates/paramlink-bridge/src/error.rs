//! Error types for the bridge.
//!
//! None of these ever reach the UI. Command handlers log them and answer
//! with an empty result, the same way an unknown parameter uid is handled.

use thiserror::Error;

/// Errors raised while decoding commands or encoding pushes.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A required positional argument was not supplied.
    #[error("{command}: missing argument {index}")]
    MissingArgument { command: &'static str, index: usize },

    /// A positional argument had the wrong shape.
    #[error("{command}: argument {index} is not {expected}")]
    InvalidArgument {
        command: &'static str,
        index: usize,
        expected: &'static str,
    },

    /// A reply or push payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
