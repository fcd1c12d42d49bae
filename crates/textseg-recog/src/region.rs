//! Region records
//!
//! A [`Region`] is a numbered box produced by segmentation. A
//! [`RegionResult`] adds the recognized text and is what a run returns.
//! Both are immutable once produced.

use serde::{Deserialize, Serialize};
use textseg_core::Box;

/// A text region found on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// 1-based position in reading order
    pub region_id: u32,
    /// Bounding box in page coordinates
    pub bounds: Box,
}

impl Region {
    pub fn new(region_id: u32, bounds: Box) -> Self {
        Self { region_id, bounds }
    }
}

/// A region together with its recognized text
///
/// Serializes with the flat schema `{region_id, x, y, w, h, text}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionResult {
    pub region_id: u32,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Recognized text with surrounding whitespace removed; may be empty
    pub text: String,
}

impl RegionResult {
    pub fn new(region: &Region, text: impl Into<String>) -> Self {
        Self {
            region_id: region.region_id,
            x: region.bounds.x,
            y: region.bounds.y,
            w: region.bounds.w,
            h: region.bounds.h,
            text: text.into(),
        }
    }

    /// Bounding box of the region
    pub fn bounds(&self) -> Box {
        Box::new_unchecked(self.x, self.y, self.w, self.h)
    }

    /// The region this result was produced for
    pub fn region(&self) -> Region {
        Region::new(self.region_id, self.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_flat_schema() {
        let region = Region::new(2, Box::new_unchecked(10, 20, 300, 40));
        let result = RegionResult::new(&region, "Hello");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "region_id": 2, "x": 10, "y": 20, "w": 300, "h": 40, "text": "Hello"
            })
        );

        let back: RegionResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.region(), region);
        assert_eq!(back.bounds(), region.bounds);
    }
}
