//! Segmentation configuration
//!
//! Every tunable of the segmentation stages lives in one
//! [`SegmentationConfig`]. The defaults are the values the detector was
//! tuned with on typical 300 dpi scans. Configurations can be loaded from
//! JSON; missing fields keep their defaults.

use crate::pageseg::{MergeOptions, NormalizeOptions};
use crate::select::FilterOptions;
use crate::{RecogError, RecogResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use textseg_color::AdaptiveThresholdOptions;
use textseg_io::IoError;

/// Parameters for all segmentation stages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    pub normalize: NormalizeOptions,
    pub binarize: AdaptiveThresholdOptions,
    pub merge: MergeOptions,
    pub filter: FilterOptions,
}

impl SegmentationConfig {
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_binarize(mut self, binarize: AdaptiveThresholdOptions) -> Self {
        self.binarize = binarize;
        self
    }

    pub fn with_merge(mut self, merge: MergeOptions) -> Self {
        self.merge = merge;
        self
    }

    pub fn with_filter(mut self, filter: FilterOptions) -> Self {
        self.filter = filter;
        self
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::Config`] if the text is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json_str(text: &str) -> RecogResult<Self> {
        serde_json::from_str(text).map_err(|e| RecogError::Config(e.to_string()))
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::Io`] if the file cannot be read and
    /// [`RecogError::Config`] if it does not parse.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RecogResult<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(IoError::from)?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> RecogResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RecogError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textseg_color::AdaptiveMethod;

    #[test]
    fn test_default_values() {
        let cfg = SegmentationConfig::default();
        assert_eq!(cfg.normalize.radius, 3);
        assert_eq!(cfg.binarize.window_size, 35);
        assert_eq!(cfg.binarize.c, 15.0);
        assert_eq!(cfg.merge, MergeOptions::default().with_brick(15, 3).with_iterations(2));
        assert_eq!(cfg.filter.area_min, 800);
        assert_eq!(cfg.filter.width_min, 30);
        assert_eq!(cfg.filter.height_min, 15);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = SegmentationConfig::from_json_str(
            r#"{"merge": {"brick_width": 25}, "binarize": {"method": "mean"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.merge.brick_width, 25);
        assert_eq!(cfg.merge.brick_height, 3);
        assert_eq!(cfg.binarize.method, AdaptiveMethod::Mean);
        assert_eq!(cfg.binarize.window_size, 35);
        assert_eq!(cfg.filter, FilterOptions::default());
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = SegmentationConfig::default()
            .with_filter(FilterOptions::default().with_area_min(1200));
        let text = cfg.to_json_string().unwrap();
        assert_eq!(SegmentationConfig::from_json_str(&text).unwrap(), cfg);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SegmentationConfig::from_json_str(r#"{"merge": {"iterations": "two"}}"#),
            Err(RecogError::Config(_))
        ));
        assert!(matches!(
            SegmentationConfig::from_json_file("/nonexistent/textseg.json"),
            Err(RecogError::Io(_))
        ));
    }
}
