//! Error types for textseg-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] textseg_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid seed position
    #[error("invalid seed position: ({x}, {y})")]
    InvalidSeed { x: u32, y: u32 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
