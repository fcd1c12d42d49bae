//! Indicator-based box selection
//!
//! A selection is done in two steps: build a boolean indicator with one
//! entry per box, then keep the boxes whose entry is `true`. Indicators
//! from several criteria are combined with [`and_indicators`].

use super::{Boxa, SizeRelation};

/// Selection mode for size-based indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSelectType {
    /// Select based on width only
    Width,
    /// Select based on height only
    Height,
    /// Select if either width or height satisfies the relation
    Either,
    /// Select only if both width and height satisfy the relation
    Both,
}

impl Boxa {
    /// Generate a boolean indicator based on box dimensions.
    ///
    /// Width is compared against `width` and height against `height`.
    pub fn make_size_indicator(
        &self,
        width: i32,
        height: i32,
        select_type: SizeSelectType,
        relation: SizeRelation,
    ) -> Vec<bool> {
        self.iter()
            .map(|b| {
                let w_ok = relation.holds(b.w, width);
                let h_ok = relation.holds(b.h, height);
                match select_type {
                    SizeSelectType::Width => w_ok,
                    SizeSelectType::Height => h_ok,
                    SizeSelectType::Either => w_ok || h_ok,
                    SizeSelectType::Both => w_ok && h_ok,
                }
            })
            .collect()
    }

    /// Generate a boolean indicator based on box area.
    pub fn make_area_indicator(&self, area: i64, relation: SizeRelation) -> Vec<bool> {
        self.iter().map(|b| relation.holds(b.area(), area)).collect()
    }

    /// Filter boxes using a boolean indicator array.
    ///
    /// Returns boxes where the indicator is `true`, in their original
    /// order. Boxes past the end of `indicator` are dropped.
    pub fn select_with_indicator(&self, indicator: &[bool]) -> Boxa {
        self.iter()
            .zip(indicator)
            .filter(|&(_, &keep)| keep)
            .map(|(b, _)| *b)
            .collect()
    }
}

/// Combine two indicators element-wise with logical AND.
///
/// The result has the length of the shorter input.
pub fn and_indicators(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x && y).collect()
}
