//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in a 1-bit image, pixel 0 occupies bit 31 (MSB) of the first word.

use super::{Pix, PixData, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

impl PixData {
    #[inline]
    fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn line(&self, y: u32) -> &[u32] {
        let wpl = self.wpl as usize;
        let start = y as usize * wpl;
        &self.data[start..start + wpl]
    }

    #[inline]
    fn line_mut(&mut self, y: u32) -> &mut [u32] {
        let wpl = self.wpl as usize;
        let start = y as usize * wpl;
        &mut self.data[start..start + wpl]
    }

    #[inline]
    fn get(&self, x: u32, y: u32) -> u32 {
        let line = self.line(y);
        match self.depth {
            PixelDepth::Bit1 => get_data_bit(line, x),
            PixelDepth::Bit8 => get_data_byte(line, x),
            PixelDepth::Bit32 => line[x as usize],
        }
    }

    #[inline]
    fn set(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth;
        let line = self.line_mut(y);
        match depth {
            PixelDepth::Bit1 => set_data_bit(line, x, val),
            PixelDepth::Bit8 => set_data_byte(line, x, val),
            PixelDepth::Bit32 => line[x as usize] = val,
        }
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.inner
            .in_bounds(x, y)
            .then(|| self.inner.get(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; `x >= width` reads padding or panics.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.get(x, y)
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.inner
            .in_bounds(x, y)
            .then(|| self.inner.get(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.get(x, y)
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the pixel depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if !self.inner.in_bounds(x, y) {
            let (index, len) = if x >= self.inner.width {
                (x as usize, self.inner.width as usize)
            } else {
                (y as usize, self.inner.height as usize)
            };
            return Err(Error::IndexOutOfBounds { index, len });
        }
        self.inner.set(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; `x >= width` writes padding or panics.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        self.inner.set(x, y, val);
    }

    /// Set every pixel of the rectangle `(x, y, w, h)` to `val`.
    ///
    /// The rectangle is clipped to the image.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, val: u32) {
        let x_end = x.saturating_add(w).min(self.inner.width);
        let y_end = y.saturating_add(h).min(self.inner.height);
        for yy in y..y_end {
            for xx in x..x_end {
                self.inner.set(xx, yy, val);
            }
        }
    }
}

/// Get a 1-bit pixel value.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel value (any nonzero `val` sets the bit).
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 5) as usize];
    let mask = 0x8000_0000u32 >> (x & 31);
    if val & 1 != 0 {
        *word |= mask;
    } else {
        *word &= !mask;
    }
}

/// Get an 8-bit pixel value.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    (line[(x >> 2) as usize] >> (8 * (3 - (x & 3)))) & 0xff
}

/// Set an 8-bit pixel value.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 2) as usize];
    let shift = 8 * (3 - (x & 3));
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_packing_msb_first() {
        let mut line = [0u32; 2];
        set_data_bit(&mut line, 0, 1);
        set_data_bit(&mut line, 33, 1);
        assert_eq!(line[0], 0x8000_0000);
        assert_eq!(line[1], 0x4000_0000);
        assert_eq!(get_data_bit(&line, 33), 1);
        set_data_bit(&mut line, 0, 0);
        assert_eq!(line[0], 0);
    }

    #[test]
    fn test_byte_packing() {
        let mut line = [0u32; 1];
        set_data_byte(&mut line, 0, 0xAB);
        set_data_byte(&mut line, 3, 0x12);
        assert_eq!(line[0], 0xAB00_0012);
        assert_eq!(get_data_byte(&line, 3), 0x12);
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut pm = PixMut::new(10, 10, PixelDepth::Bit8).unwrap();
        assert!(pm.set_pixel(10, 0, 1).is_err());
        assert!(pm.set_pixel(9, 9, 77).is_ok());
        assert_eq!(pm.get_pixel(9, 9), Some(77));
        assert_eq!(pm.get_pixel(0, 10), None);
    }

    #[test]
    fn test_rgb_roundtrip() {
        let mut pm = PixMut::new(3, 3, PixelDepth::Bit32).unwrap();
        pm.set_pixel(2, 1, crate::color::compose_rgb(9, 8, 7)).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgb(2, 1), Some((9, 8, 7)));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut pm = PixMut::new(10, 10, PixelDepth::Bit1).unwrap();
        pm.fill_rect(8, 8, 5, 5, 1);
        let pix: Pix = pm.into();
        assert_eq!(pix.count_pixels().unwrap(), 4);
    }
}
