//! Pixel depth conversion functions
//!
//! Every page entering the pipeline is reduced to 8 bpp grayscale, and
//! every binarized crop is expanded back to 8 bpp for the recognizer.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// ITU-R BT.601 luma weight for red.
pub const LUMA_RED_WEIGHT: f32 = 0.299;
/// ITU-R BT.601 luma weight for green.
pub const LUMA_GREEN_WEIGHT: f32 = 0.587;
/// ITU-R BT.601 luma weight for blue.
pub const LUMA_BLUE_WEIGHT: f32 = 0.114;

impl Pix {
    /// Convert an image of any supported depth to 8 bpp grayscale.
    ///
    /// - 1 bpp: 0 -> 255 (white), 1 -> 0 (black)
    /// - 8 bpp: deep copy
    /// - 32 bpp: BT.601 luminance, alpha ignored
    ///
    /// # Examples
    ///
    /// ```
    /// use textseg_core::{Pix, PixelDepth};
    ///
    /// let pix32 = Pix::new(10, 10, PixelDepth::Bit32).unwrap();
    /// let pix8 = pix32.convert_to_8().unwrap();
    /// assert_eq!(pix8.depth(), PixelDepth::Bit8);
    /// ```
    pub fn convert_to_8(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit8 => Ok(self.deep_clone()),
            PixelDepth::Bit1 => self.convert_1_to_8(255, 0),
            PixelDepth::Bit32 => self.convert_rgb_to_luminance(),
        }
    }

    /// Convert 32 bpp RGB to 8 bpp using the BT.601 luma weights.
    pub fn convert_rgb_to_luminance(&self) -> Result<Pix> {
        self.convert_rgb_to_gray(0.0, 0.0, 0.0)
    }

    /// Convert 32 bpp RGB to 8 bpp grayscale with custom weights.
    ///
    /// If all weights are 0.0, the BT.601 weights are used. Weights are
    /// normalized to sum to 1.0 if they don't already.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 32 bpp.
    /// Returns [`Error::InvalidParameter`] if any weight is negative.
    pub fn convert_rgb_to_gray(&self, rwt: f32, gwt: f32, bwt: f32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if rwt < 0.0 || gwt < 0.0 || bwt < 0.0 {
            return Err(Error::InvalidParameter("weights must all be >= 0.0".into()));
        }

        let (rwt, gwt, bwt) = if rwt == 0.0 && gwt == 0.0 && bwt == 0.0 {
            (LUMA_RED_WEIGHT, LUMA_GREEN_WEIGHT, LUMA_BLUE_WEIGHT)
        } else {
            let sum = rwt + gwt + bwt;
            if (sum - 1.0).abs() > 0.0001 {
                (rwt / sum, gwt / sum, bwt / sum)
            } else {
                (rwt, gwt, bwt)
            }
        };

        let w = self.width();
        let h = self.height();
        let mut out = PixMut::new(w, h, PixelDepth::Bit8)?;
        out.copy_resolution_from(self);
        out.set_informat(self.informat());

        for y in 0..h {
            for x in 0..w {
                let (r, g, b) = color::extract_rgb(self.get_pixel_unchecked(x, y));
                let gray = (rwt * r as f32 + gwt * g as f32 + bwt * b as f32 + 0.5) as u32;
                out.set_pixel_unchecked(x, y, gray.min(255));
            }
        }

        Ok(out.into())
    }

    /// Convert a 1 bpp image to 8 bpp, mapping 0 to `val0` and 1 to `val1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 1 bpp.
    pub fn convert_1_to_8(&self, val0: u32, val1: u32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let w = self.width();
        let h = self.height();
        let mut out = PixMut::new(w, h, PixelDepth::Bit8)?;
        out.copy_resolution_from(self);

        let (val0, val1) = (val0 & 0xff, val1 & 0xff);
        for y in 0..h {
            for x in 0..w {
                let v = if self.get_pixel_unchecked(x, y) == 0 {
                    val0
                } else {
                    val1
                };
                out.set_pixel_unchecked(x, y, v);
            }
        }
        Ok(out.into())
    }

    /// Unpack an 8 bpp image into one byte per pixel, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 8 bpp.
    pub fn to_gray_bytes(&self) -> Result<Vec<u8>> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let w = self.width();
        let mut out = Vec::with_capacity(w as usize * self.height() as usize);
        for y in 0..self.height() {
            let line = self.row_data(y);
            out.extend((0..w).map(|x| super::get_data_byte(line, x) as u8));
        }
        Ok(out)
    }

    /// Pack row-major bytes into a new 8 bpp image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `bytes.len() != width * height`.
    pub fn from_gray_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Pix> {
        if bytes.len() != width as usize * height as usize {
            return Err(Error::InvalidParameter(format!(
                "{} bytes do not fill a {}x{} image",
                bytes.len(),
                width,
                height
            )));
        }
        let mut out = PixMut::new(width, height, PixelDepth::Bit8)?;
        for (y, row) in bytes.chunks_exact(width as usize).enumerate() {
            let line = out.row_data_mut(y as u32);
            for (x, &v) in row.iter().enumerate() {
                super::set_data_byte(line, x as u32, v as u32);
            }
        }
        Ok(out.into())
    }
}
