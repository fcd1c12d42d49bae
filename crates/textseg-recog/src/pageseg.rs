//! Page segmentation
//!
//! Finds the text regions of a scanned page in six stages:
//!
//! 1. [`normalize`]: convert to 8 bpp gray and smooth with a bilateral
//!    filter, flattening paper grain while keeping ink edges sharp
//! 2. [`binarize`]: adaptive threshold against a local mean, ink becomes
//!    foreground
//! 3. [`merge_regions`]: close the mask with a wide brick so the glyphs of
//!    a line or block fuse into one blob
//! 4. [`extract_regions`]: bounding boxes of the outermost blobs
//! 5. [`filter_regions`]: drop specks, page-sized blobs and thin rules
//! 6. [`order_regions`]: sort into reading order and number from 1
//!
//! [`segment_page`] runs them all.

use crate::config::SegmentationConfig;
use crate::order::order_regions;
use crate::region::Region;
use crate::select::filter_regions;
use crate::RecogResult;
use serde::{Deserialize, Serialize};
use textseg_color::{AdaptiveThresholdOptions, adaptive_threshold};
use textseg_core::{Boxa, Pix};
use textseg_filter::bilateral_gray;
use textseg_morph::close_safe_brick_iter;
use textseg_region::find_outer_components;
use tracing::debug;

/// Options for the normalization stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Bilateral filter radius; the window is `2 * radius + 1` (default: 3)
    pub radius: u32,
    /// Spatial standard deviation (default: 50.0)
    pub spatial_stdev: f32,
    /// Intensity standard deviation (default: 50.0)
    pub range_stdev: f32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            radius: 3,
            spatial_stdev: 50.0,
            range_stdev: 50.0,
        }
    }
}

impl NormalizeOptions {
    /// Set the filter radius
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Set both standard deviations
    pub fn with_stdevs(mut self, spatial: f32, range: f32) -> Self {
        self.spatial_stdev = spatial;
        self.range_stdev = range;
        self
    }
}

/// Options for the merge (closing) stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Brick width (default: 15)
    pub brick_width: u32,
    /// Brick height (default: 3)
    pub brick_height: u32,
    /// Number of dilations, and of erosions, in the closing (default: 2)
    pub iterations: u32,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            brick_width: 15,
            brick_height: 3,
            iterations: 2,
        }
    }
}

impl MergeOptions {
    /// Set the brick size
    pub fn with_brick(mut self, width: u32, height: u32) -> Self {
        self.brick_width = width;
        self.brick_height = height;
        self
    }

    /// Set the iteration count
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }
}

/// Convert a page to smoothed 8 bpp grayscale.
///
/// 32 bpp input is reduced to BT.601 luminance and 1 bpp input is expanded
/// to black on white before smoothing. The output has the size of `pix`.
pub fn normalize(pix: &Pix, options: &NormalizeOptions) -> RecogResult<Pix> {
    let gray = pix.convert_to_8()?;
    Ok(bilateral_gray(
        &gray,
        options.radius,
        options.spatial_stdev,
        options.range_stdev,
    )?)
}

/// Threshold a smoothed gray page into an ink mask.
pub fn binarize(gray: &Pix, options: &AdaptiveThresholdOptions) -> RecogResult<Pix> {
    Ok(adaptive_threshold(gray, options)?)
}

/// Fuse nearby ink in a mask into blobs.
pub fn merge_regions(mask: &Pix, options: &MergeOptions) -> RecogResult<Pix> {
    Ok(close_safe_brick_iter(
        mask,
        options.brick_width,
        options.brick_height,
        options.iterations,
    )?)
}

/// Bounding boxes of the outermost blobs of a mask, in raster order.
pub fn extract_regions(mask: &Pix) -> RecogResult<Boxa> {
    Ok(find_outer_components(mask)?)
}

/// Run every segmentation stage on a page.
///
/// Returns the surviving regions in reading order with ids `1..=n`. A page
/// without text gives an empty list.
pub fn segment_page(pix: &Pix, config: &SegmentationConfig) -> RecogResult<Vec<Region>> {
    let gray = normalize(pix, &config.normalize)?;
    let mask = binarize(&gray, &config.binarize)?;
    debug!(
        width = pix.width(),
        height = pix.height(),
        "normalized and binarized page"
    );

    let merged = merge_regions(&mask, &config.merge)?;
    let candidates = extract_regions(&merged)?;
    debug!(candidates = candidates.len(), "extracted candidate regions");

    let kept = filter_regions(&candidates, pix.width(), pix.height(), &config.filter);
    debug!(
        kept = kept.len(),
        dropped = candidates.len() - kept.len(),
        "filtered candidate regions"
    );

    Ok(order_regions(kept))
}
