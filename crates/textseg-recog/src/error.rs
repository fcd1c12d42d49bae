//! Error types for textseg-recog

use crate::recognizer::RecognizeError;
use thiserror::Error;

/// Errors that can occur while segmenting a page or recognizing its regions
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] textseg_core::Error),

    /// Image decoding or file access error
    #[error("io error: {0}")]
    Io(#[from] textseg_io::IoError),

    /// Normalization filter error
    #[error("filter error: {0}")]
    Filter(#[from] textseg_filter::FilterError),

    /// Thresholding error
    #[error("threshold error: {0}")]
    Color(#[from] textseg_color::ColorError),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] textseg_morph::MorphError),

    /// Region extraction error
    #[error("region error: {0}")]
    Region(#[from] textseg_region::RegionError),

    /// The text recognizer failed on a region
    #[error("recognizer failed on region {region_id}: {source}")]
    Recognizer {
        region_id: u32,
        #[source]
        source: RecognizeError,
    },

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
