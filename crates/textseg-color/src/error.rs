//! Error types for textseg-color

use thiserror::Error;

/// Errors that can occur during thresholding operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] textseg_core::Error),

    /// Error from the local-mean filter
    #[error("filter error: {0}")]
    Filter(#[from] textseg_filter::FilterError),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
