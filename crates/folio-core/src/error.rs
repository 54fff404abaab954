//! Error handling for the folio catalog engine.
//!
//! Lookup misses are not errors: absent keys come back as `Option::None`,
//! empty sequences or `Ok(false)`. The variants here cover the remaining
//! taxonomy — malformed input, positional access out of bounds, and the
//! store/index disagreeing after a mutation.

use thiserror::Error;

/// Error type for catalog engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Malformed record passed to a mutation.
    #[error("invalid input: {message}")]
    InvalidInput { message: String, field: Option<String> },

    /// Position-based access outside `[0, len)`.
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The primary collection and the index set disagree.
    ///
    /// Unreachable while the catalog invariants hold; surfacing it instead
    /// of swallowing it is what turns a silent stale-index bug into a
    /// debuggable failure.
    #[error("internal inconsistency during {operation}: {message}")]
    InternalInconsistency { message: String, operation: String, key: Option<String> },
}

impl CatalogError {
    /// Get the error category for logging and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            CatalogError::InvalidInput { .. } => "invalid_input",
            CatalogError::IndexOutOfRange { .. } => "index_out_of_range",
            CatalogError::InternalInconsistency { .. } => "internal_inconsistency",
        }
    }

    /// Check if this error is recoverable by the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CatalogError::InvalidInput { .. } => true,
            CatalogError::IndexOutOfRange { .. } => true,
            // Programming error: catalog state can no longer be trusted.
            CatalogError::InternalInconsistency { .. } => false,
        }
    }

    /// Create an invalid-input error without field context.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into(), field: None }
    }

    /// Create an invalid-input error naming the offending field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into(), field: Some(field.to_string()) }
    }

    /// Create an out-of-range error for positional access.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create an internal-inconsistency error for a failed operation.
    pub fn inconsistency(operation: &str, key: Option<&str>, message: impl Into<String>) -> Self {
        Self::InternalInconsistency {
            message: message.into(),
            operation: operation.to_string(),
            key: key.map(str::to_string),
        }
    }
}

/// Result type alias for catalog engine operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
