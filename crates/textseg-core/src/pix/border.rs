//! Border operations for images
//!
//! Adding and removing padding around an image. Morphological closing
//! pads the mask before operating so that results near the image edge
//! do not depend on what lies beyond it.

use super::{Pix, PixMut};
use crate::error::{Error, Result};

impl Pix {
    /// Add a general border with different sizes per side.
    ///
    /// The border is filled with `val`; the interior is a copy of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the padded size overflows.
    pub fn add_border_general(
        &self,
        left: u32,
        right: u32,
        top: u32,
        bot: u32,
        val: u32,
    ) -> Result<Pix> {
        let w = self.width();
        let h = self.height();
        let overflow = Error::InvalidDimension {
            width: w,
            height: h,
        };
        let wd = w
            .checked_add(left)
            .and_then(|v| v.checked_add(right))
            .ok_or(overflow)?;
        let hd = h
            .checked_add(top)
            .and_then(|v| v.checked_add(bot))
            .ok_or(Error::InvalidDimension {
                width: w,
                height: h,
            })?;

        let mut out = PixMut::new(wd, hd, self.depth())?;
        out.set_spp(self.spp());
        out.copy_resolution_from(self);
        if val != 0 {
            out.fill_rect(0, 0, wd, hd, val);
        }
        for y in 0..h {
            for x in 0..w {
                out.set_pixel_unchecked(x + left, y + top, self.get_pixel_unchecked(x, y));
            }
        }
        Ok(out.into())
    }

    /// Remove a general border with different sizes per side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the border would remove the
    /// whole image.
    pub fn remove_border_general(&self, left: u32, right: u32, top: u32, bot: u32) -> Result<Pix> {
        let w = self.width();
        let h = self.height();
        let horiz = u64::from(left) + u64::from(right);
        let vert = u64::from(top) + u64::from(bot);
        if horiz >= u64::from(w) || vert >= u64::from(h) {
            return Err(Error::InvalidParameter(format!(
                "border ({left}, {right}, {top}, {bot}) exceeds image size {w}x{h}"
            )));
        }
        self.clip_rectangle(left, top, w - left - right, h - top - bot)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Pix, PixMut, PixelDepth};

    #[test]
    fn test_add_remove_border_roundtrip() {
        let mut pm = PixMut::new(7, 5, PixelDepth::Bit1).unwrap();
        pm.set_pixel(0, 0, 1).unwrap();
        pm.set_pixel(6, 4, 1).unwrap();
        let pix: Pix = pm.into();

        let padded = pix.add_border_general(3, 40, 2, 1, 0).unwrap();
        assert_eq!(padded.width(), 50);
        assert_eq!(padded.height(), 8);
        assert_eq!(padded.get_pixel(3, 2), Some(1));
        assert_eq!(padded.get_pixel(9, 6), Some(1));
        assert_eq!(padded.count_pixels().unwrap(), 2);

        let back = padded.remove_border_general(3, 40, 2, 1).unwrap();
        assert_eq!(back.width(), 7);
        assert_eq!(back.height(), 5);
        assert_eq!(back.get_pixel(0, 0), Some(1));
        assert_eq!(back.get_pixel(6, 4), Some(1));
    }

    #[test]
    fn test_border_fill_value() {
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        let padded = pix.add_border_general(1, 1, 1, 1, 255).unwrap();
        assert_eq!(padded.get_pixel(0, 0), Some(255));
        assert_eq!(padded.get_pixel(1, 1), Some(0));
    }

    #[test]
    fn test_remove_border_too_large() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(pix.remove_border_general(2, 2, 2, 2).is_err());
        assert!(pix.remove_border_general(0, 0, 1, 3).is_err());
    }
}
