//! Bridge error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Unknown vehicle class: {0}")]
    UnknownVehicleClass(String),

    #[error("Invalid parameter for {op}: {reason}")]
    InvalidParameter { op: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
