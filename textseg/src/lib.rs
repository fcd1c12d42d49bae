//! textseg - Text region detection for scanned pages
//!
//! Finds the blocks and lines of text on a scanned page, numbers them in
//! reading order and hands a clean crop of each to an OCR engine of your
//! choice.
//!
//! # Overview
//!
//! - Image decoding (PNG, JPEG, PNM, BMP)
//! - Bilateral smoothing and adaptive / Otsu binarization
//! - Binary morphology and connected component extraction
//! - Region filtering, reading order and the recognition pipeline
//!
//! # Example
//!
//! ```
//! use textseg::{Pix, PixMut, PixelDepth};
//! use textseg::recog::Pipeline;
//!
//! let mut pm = PixMut::new(640, 480, PixelDepth::Bit8).unwrap();
//! pm.fill_rect(0, 0, 640, 480, 255);
//! pm.fill_rect(120, 200, 400, 60, 0);
//! let page: Pix = pm.into();
//!
//! let regions = Pipeline::default().segment(&page).unwrap();
//! assert_eq!(regions.len(), 1);
//! assert_eq!(regions[0].region_id, 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use textseg_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use textseg_color as color;
pub use textseg_filter as filter;
pub use textseg_io as io;
pub use textseg_morph as morph;
pub use textseg_recog as recog;
pub use textseg_region as region;

// The pipeline entry points
pub use textseg_recog::{
    FailurePolicy, Pipeline, PipelineOptions, RecogError, RecogResult, RecognizeError,
    RecognizeMode, RecognizerConfig, Region, RegionResult, SegmentationConfig, TextRecognizer,
};

/// Install a `tracing` subscriber that writes to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this
/// more than once, or after another subscriber was installed, does
/// nothing.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
