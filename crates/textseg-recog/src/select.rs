//! Candidate region filtering
//!
//! Drops boxes that are too small to hold text, too large to be anything
//! but the page itself, or too thin to be a line of text. Every criterion
//! becomes an indicator over the boxes and the indicators are AND-ed, so
//! the filter runs in a single pass and filtering its own output changes
//! nothing.

use serde::{Deserialize, Serialize};
use textseg_core::{Boxa, SizeRelation, SizeSelectType, and_indicators};

/// Thresholds for [`filter_regions`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Smallest box area kept, in square pixels (default: 800)
    pub area_min: i64,
    /// Largest box area kept, as a fraction of the page area (default: 0.90)
    pub area_max_fraction: f64,
    /// Smallest box height kept (default: 15)
    pub height_min: i32,
    /// Smallest box width kept (default: 30)
    pub width_min: i32,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            area_min: 800,
            area_max_fraction: 0.90,
            height_min: 15,
            width_min: 30,
        }
    }
}

impl FilterOptions {
    pub fn with_area_min(mut self, area: i64) -> Self {
        self.area_min = area;
        self
    }

    pub fn with_area_max_fraction(mut self, fraction: f64) -> Self {
        self.area_max_fraction = fraction;
        self
    }

    pub fn with_min_size(mut self, width: i32, height: i32) -> Self {
        self.width_min = width;
        self.height_min = height;
        self
    }

    /// Largest box area kept on a `width x height` page.
    pub fn area_max(&self, width: u32, height: u32) -> i64 {
        let page = u64::from(width) * u64::from(height);
        (self.area_max_fraction * page as f64).floor() as i64
    }
}

/// Keep the boxes that pass every threshold in `options`.
///
/// `width` and `height` are the page size the boxes were found on. A box
/// survives iff
/// - `w * h >= area_min`,
/// - `w * h <= area_max_fraction * width * height`,
/// - `w >= width_min` and `h >= height_min`.
///
/// The input order is preserved. Thresholds are not validated; settings
/// that nothing can satisfy give an empty result.
pub fn filter_regions(boxes: &Boxa, width: u32, height: u32, options: &FilterOptions) -> Boxa {
    let big_enough = boxes.make_area_indicator(options.area_min, SizeRelation::GreaterThanOrEqual);
    let small_enough = boxes.make_area_indicator(
        options.area_max(width, height),
        SizeRelation::LessThanOrEqual,
    );
    let not_thin = boxes.make_size_indicator(
        options.width_min,
        options.height_min,
        SizeSelectType::Both,
        SizeRelation::GreaterThanOrEqual,
    );

    let keep = and_indicators(&and_indicators(&big_enough, &small_enough), &not_thin);
    boxes.select_with_indicator(&keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textseg_core::Box;

    fn candidates() -> Boxa {
        [
            Box::new_unchecked(10, 10, 200, 40),  // kept
            Box::new_unchecked(0, 0, 10, 10),     // speck
            Box::new_unchecked(5, 5, 790, 990),   // whole page
            Box::new_unchecked(50, 300, 400, 10), // rule line
            Box::new_unchecked(60, 400, 20, 60),  // narrow
            Box::new_unchecked(70, 500, 40, 20),  // area exactly 800
            Box::new_unchecked(80, 600, 30, 15),  // minimum size, too small
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_filter_defaults() {
        let kept = filter_regions(&candidates(), 800, 1000, &FilterOptions::default());
        assert_eq!(
            kept.boxes(),
            &[
                Box::new_unchecked(10, 10, 200, 40),
                Box::new_unchecked(70, 500, 40, 20),
            ]
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let opts = FilterOptions::default();
        let once = filter_regions(&candidates(), 800, 1000, &opts);
        let twice = filter_regions(&once, 800, 1000, &opts);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_area_max_bound() {
        let opts = FilterOptions::default();
        assert_eq!(opts.area_max(800, 1000), 720_000);
        let page = Boxa::from_iter([
            Box::new_unchecked(0, 0, 800, 900),
            Box::new_unchecked(0, 0, 720, 1000),
            Box::new_unchecked(0, 0, 721, 1000),
        ]);
        let kept = filter_regions(&page, 800, 1000, &opts);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.get(1).map(|b| b.w), Some(720));
    }

    #[test]
    fn test_unsatisfiable_gives_empty() {
        let opts = FilterOptions::default().with_area_min(1_000_000);
        assert!(filter_regions(&candidates(), 800, 1000, &opts).is_empty());
        let opts = FilterOptions::default().with_area_max_fraction(-1.0);
        assert!(filter_regions(&candidates(), 800, 1000, &opts).is_empty());
    }

    #[test]
    fn test_relaxed_min_size() {
        let opts = FilterOptions::default().with_area_min(0).with_min_size(1, 1);
        let kept = filter_regions(&candidates(), 800, 1000, &opts);
        assert_eq!(kept.len(), 6);
    }
}
