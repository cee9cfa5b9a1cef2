//! Error types shared by every farm geometry operation.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while decoding or processing farm geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Malformed WKT text, unknown type keyword or unparsable number.
    #[error("Invalid WKT: {0}")]
    InvalidWkt(String),

    /// The geometry kind is not accepted by the requested operation.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A planar boolean operation could not produce a result.
    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GeometryError {
    pub(crate) fn invalid_wkt(message: impl Into<String>) -> Self {
        GeometryError::InvalidWkt(message.into())
    }

    pub(crate) fn invalid_geometry(message: impl Into<String>) -> Self {
        GeometryError::InvalidGeometry(message.into())
    }

    pub(crate) fn operation_failed(message: impl Into<String>) -> Self {
        GeometryError::OperationFailed(message.into())
    }

    /// Returns true for errors that signal malformed WKT input.
    pub fn is_invalid_wkt(&self) -> bool {
        matches!(self, GeometryError::InvalidWkt(_))
    }
}

/// Result type for farm geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;
