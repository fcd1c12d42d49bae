//! Rectangular clipping
//!
//! Extracting a sub-image, as done for every region handed to a text
//! recognizer.

use super::{Pix, PixMut};
use crate::Box;
use crate::error::{Error, Result};

impl Pix {
    /// Extract a rectangular sub-region as a new image.
    ///
    /// The rectangle is clipped to the image bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if:
    /// - `w` or `h` is zero
    /// - The rectangle origin lies outside the image
    ///
    /// # Examples
    ///
    /// ```
    /// use textseg_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(100, 80, PixelDepth::Bit8).unwrap();
    /// let clipped = pix.clip_rectangle(80, 60, 50, 50).unwrap();
    /// assert_eq!(clipped.width(), 20);
    /// assert_eq!(clipped.height(), 20);
    /// ```
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Pix> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle has zero dimension: {}x{}",
                w, h
            )));
        }

        let src_w = self.width();
        let src_h = self.height();

        if x >= src_w || y >= src_h {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle origin ({}, {}) is outside image bounds ({}x{})",
                x, y, src_w, src_h
            )));
        }

        let clip_w = w.min(src_w - x);
        let clip_h = h.min(src_h - y);

        let mut pixd = PixMut::new(clip_w, clip_h, self.depth())?;
        pixd.set_spp(self.spp());
        pixd.copy_resolution_from(self);

        for dy in 0..clip_h {
            for dx in 0..clip_w {
                let val = self.get_pixel_unchecked(x + dx, y + dy);
                pixd.set_pixel_unchecked(dx, dy, val);
            }
        }

        Ok(pixd.into())
    }

    /// Extract the region covered by `b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the box does not overlap the
    /// image.
    pub fn clip_box(&self, b: &Box) -> Result<Pix> {
        let clipped = b
            .clip(self.width() as i32, self.height() as i32)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "box {:?} does not intersect image {}x{}",
                    b,
                    self.width(),
                    self.height()
                ))
            })?;
        self.clip_rectangle(
            clipped.x as u32,
            clipped.y as u32,
            clipped.w as u32,
            clipped.h as u32,
        )
    }
}
