//! Diagram error types.

use thiserror::Error;

/// Errors that can occur when exporting or importing a diagram
#[derive(Debug, Error)]
pub enum DiagramError {
    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),
}
