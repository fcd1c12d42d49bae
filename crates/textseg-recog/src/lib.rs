//! textseg-recog - Text region detection and recognition
//!
//! This crate ties the image crates together into a page pipeline:
//!
//! - **Segmentation** ([`pageseg`]): normalize, binarize, merge, extract,
//!   filter and order text regions
//! - **Filtering** ([`select`]) and **ordering** ([`order`]) of candidate
//!   boxes
//! - **Recognition** ([`recognizer`]): the [`TextRecognizer`] contract an
//!   OCR engine wrapper implements
//! - **Pipeline** ([`pipeline`]): per-region crop preparation, recognizer
//!   calls and failure handling
//!
//! # Example
//!
//! ```no_run
//! use textseg_core::Pix;
//! use textseg_recog::{Pipeline, RecognizeError, RecognizeMode, TextRecognizer};
//!
//! struct Engine;
//!
//! impl TextRecognizer for Engine {
//!     fn recognize(&self, _image: &Pix, _mode: RecognizeMode) -> Result<String, RecognizeError> {
//!         Err(RecognizeError::Unavailable("not wired up".into()))
//!     }
//! }
//!
//! let results = Pipeline::default().run_path("page.png", &Engine).unwrap();
//! for r in &results {
//!     println!("{} {} {} {} {} {}", r.region_id, r.x, r.y, r.w, r.h, r.text);
//! }
//! ```

pub mod config;
mod error;
pub mod order;
pub mod pageseg;
pub mod pipeline;
pub mod recognizer;
pub mod region;
pub mod select;

pub use config::SegmentationConfig;
pub use error::{RecogError, RecogResult};
pub use order::order_regions;
pub use pageseg::{
    MergeOptions, NormalizeOptions, binarize, extract_regions, merge_regions, normalize,
    segment_page,
};
pub use pipeline::{FailurePolicy, Pipeline, PipelineOptions, prepare_crop};
pub use recognizer::{RecognizeError, RecognizeMode, RecognizerConfig, TextRecognizer};
pub use region::{Region, RegionResult};
pub use select::{FilterOptions, filter_regions};

// Re-export core for convenience
pub use textseg_core;
