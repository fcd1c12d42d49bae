//! Segment-then-recognize pipeline
//!
//! A [`Pipeline`] segments a page into regions, prepares a binarized crop
//! of each region from the original page and passes it to a
//! [`TextRecognizer`]. The result is one [`RegionResult`] per region, in
//! reading order.
//!
//! Crops are cut from the page as loaded, not from the smoothed or
//! thresholded intermediates, and each crop gets its own global (Otsu)
//! threshold so that faint and dark regions on one page are both legible.

use crate::config::SegmentationConfig;
use crate::pageseg::segment_page;
use crate::recognizer::{RecognizeMode, TextRecognizer};
use crate::region::{Region, RegionResult};
use crate::{RecogError, RecogResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use textseg_color::threshold_otsu;
use textseg_core::Pix;
use tracing::{debug, info, warn};

/// What to do when the recognizer fails on a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and record empty text for the region
    #[default]
    BestEffort,
    /// Abort the run with [`RecogError::Recognizer`]
    FailFast,
}

/// Options for a [`Pipeline`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub segmentation: SegmentationConfig,
    pub failure_policy: FailurePolicy,
    /// Mode passed to the recognizer for every region
    pub recognize_mode: RecognizeMode,
    /// Recognize regions on the rayon thread pool
    pub parallel: bool,
}

impl PipelineOptions {
    pub fn with_segmentation(mut self, segmentation: SegmentationConfig) -> Self {
        self.segmentation = segmentation;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_recognize_mode(mut self, mode: RecognizeMode) -> Self {
        self.recognize_mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Page segmentation and recognition driver
///
/// # Example
///
/// ```
/// use textseg_core::{Pix, PixMut, PixelDepth};
/// use textseg_recog::{Pipeline, RecognizeError, RecognizeMode, TextRecognizer};
///
/// struct Echo;
///
/// impl TextRecognizer for Echo {
///     fn recognize(&self, _image: &Pix, _mode: RecognizeMode) -> Result<String, RecognizeError> {
///         Ok("  text\n".to_string())
///     }
/// }
///
/// let mut pm = PixMut::new(400, 300, PixelDepth::Bit8).unwrap();
/// pm.fill_rect(0, 0, 400, 300, 255);
/// pm.fill_rect(100, 100, 200, 40, 0);
/// let page: Pix = pm.into();
///
/// let results = Pipeline::default().run(&page, &Echo).unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].region_id, 1);
/// assert_eq!(results[0].text, "text");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Find the text regions of a page without recognizing them.
    pub fn segment(&self, pix: &Pix) -> RecogResult<Vec<Region>> {
        segment_page(pix, &self.options.segmentation)
    }

    /// Segment a page and recognize every region.
    ///
    /// Results are in reading order with ids `1..=n`. A page without text
    /// gives an empty list and the recognizer is never called.
    ///
    /// # Errors
    ///
    /// Returns an error if segmentation fails, or, under
    /// [`FailurePolicy::FailFast`], [`RecogError::Recognizer`] for the
    /// lowest-numbered region the recognizer failed on.
    pub fn run(&self, pix: &Pix, recognizer: &dyn TextRecognizer) -> RecogResult<Vec<RegionResult>> {
        let regions = self.segment(pix)?;
        info!(
            regions = regions.len(),
            parallel = self.options.parallel,
            "segmented page"
        );

        let results: Vec<RecogResult<RegionResult>> = if self.options.parallel {
            regions
                .par_iter()
                .map(|region| self.recognize_region(pix, region, recognizer))
                .collect()
        } else {
            let mut results = Vec::with_capacity(regions.len());
            for region in &regions {
                let result = self.recognize_region(pix, region, recognizer);
                let failed = result.is_err();
                results.push(result);
                if failed {
                    break;
                }
            }
            results
        };

        results.into_iter().collect()
    }

    /// Load an image file and [`run`](Self::run) it.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::Io`] if the file cannot be read or decoded.
    pub fn run_path<P: AsRef<Path>>(
        &self,
        path: P,
        recognizer: &dyn TextRecognizer,
    ) -> RecogResult<Vec<RegionResult>> {
        let path = path.as_ref();
        let pix = textseg_io::read_image(path)?;
        debug!(
            path = %path.display(),
            width = pix.width(),
            height = pix.height(),
            "loaded page"
        );
        self.run(&pix, recognizer)
    }

    fn recognize_region(
        &self,
        page: &Pix,
        region: &Region,
        recognizer: &dyn TextRecognizer,
    ) -> RecogResult<RegionResult> {
        let crop = prepare_crop(page, region)?;
        match recognizer.recognize(&crop, self.options.recognize_mode) {
            Ok(text) => Ok(RegionResult::new(region, text.trim())),
            Err(source) => match self.options.failure_policy {
                FailurePolicy::BestEffort => {
                    warn!(
                        region_id = region.region_id,
                        error = %source,
                        "recognizer failed, keeping region with empty text"
                    );
                    Ok(RegionResult::new(region, ""))
                }
                FailurePolicy::FailFast => Err(RecogError::Recognizer {
                    region_id: region.region_id,
                    source,
                }),
            },
        }
    }
}

/// Cut a region out of the original page and binarize it for recognition.
///
/// The crop is converted to 8 bpp gray, thresholded with Otsu's method and
/// expanded back to 8 bpp: ink is 0, paper is 255.
pub fn prepare_crop(page: &Pix, region: &Region) -> RecogResult<Pix> {
    let crop = page.clip_box(&region.bounds)?;
    let gray = crop.convert_to_8()?;
    let mask = threshold_otsu(&gray)?;
    Ok(mask.convert_1_to_8(255, 0)?)
}
