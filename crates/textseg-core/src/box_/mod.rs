//! Box, Boxa - Rectangle regions
//!
//! A [`Box`] is an axis-aligned rectangle in page pixel coordinates,
//! origin at the top-left corner. A [`Boxa`] is an ordered array of them;
//! the segmentation stages pass region candidates around as a `Boxa`.

mod select;

pub use select::{SizeSelectType, and_indicators};

use crate::error::{Error, Result};

/// Relation used when comparing a box measurement against a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRelation {
    /// Measurement < threshold
    LessThan,
    /// Measurement > threshold
    GreaterThan,
    /// Measurement <= threshold
    LessThanOrEqual,
    /// Measurement >= threshold
    GreaterThanOrEqual,
}

impl SizeRelation {
    /// Evaluate `value <relation> threshold`.
    #[inline]
    pub fn holds<T: PartialOrd>(self, value: T, threshold: T) -> bool {
        match self {
            SizeRelation::LessThan => value < threshold,
            SizeRelation::GreaterThan => value > threshold,
            SizeRelation::LessThanOrEqual => value <= threshold,
            SizeRelation::GreaterThanOrEqual => value >= threshold,
        }
    }
}

/// A rectangle region
///
/// A small `Copy` type; `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this box contains another box
    pub fn contains_box(&self, other: &Box) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Clip the box to `[0, width) x [0, height)`.
    ///
    /// Returns `None` if nothing remains.
    pub fn clip(&self, width: i32, height: i32) -> Option<Box> {
        let x = self.x.max(0);
        let y = self.y.max(0);
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);

        (x < right && y < bottom).then(|| Box {
            x,
            y,
            w: right - x,
            h: bottom - y,
        })
    }
}

/// Array of boxes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boxa {
    boxes: Vec<Box>,
}

impl Boxa {
    /// Create a new empty Boxa
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Get the number of boxes
    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Get a box by index
    pub fn get(&self, index: usize) -> Option<&Box> {
        self.boxes.get(index)
    }

    /// Add a box
    pub fn push(&mut self, b: Box) {
        self.boxes.push(b);
    }

    /// Get all boxes as a slice
    pub fn boxes(&self) -> &[Box] {
        &self.boxes
    }

    /// Sort boxes by position (top-to-bottom, then left-to-right).
    ///
    /// The sort is stable: boxes sharing the same `(y, x)` keep their
    /// relative order.
    pub fn sort_by_position(&mut self) {
        self.boxes.sort_by(|a, b| a.y.cmp(&b.y).then(a.x.cmp(&b.x)));
    }

    /// Create an iterator over boxes
    pub fn iter(&self) -> impl Iterator<Item = &Box> {
        self.boxes.iter()
    }
}

impl FromIterator<Box> for Boxa {
    fn from_iter<T: IntoIterator<Item = Box>>(iter: T) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Boxa {
    type Item = Box;
    type IntoIter = std::vec::IntoIter<Box>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Boxa {
    type Item = &'a Box;
    type IntoIter = std::slice::Iter<'a, Box>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}
