//! PIX - The raster image container
//!
//! `Pix` is the image type every pipeline stage consumes and produces.
//! Three depths are supported: 1 bpp masks, 8 bpp grayscale and 32 bpp
//! RGB(A).
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//! - For 32-bit images, color order is RGBA (red in MSB)
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership) and is never
//! modified once built. To write pixel data, start from a [`PixMut`]
//! (either [`PixMut::new`] or [`Pix::to_mut`]) and convert back with
//! `Into<Pix>`.

mod access;
mod border;
mod clip;
pub mod convert;

pub use access::*;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image (mask)
    Bit1 = 1,
    /// 8-bit grayscale
    Bit8 = 8,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }
}

/// Image file format the pixels were decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format (image built in memory)
    #[default]
    Unknown,
    /// BMP format
    Bmp,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// Binary PNM (PBM / PGM / PPM)
    Pnm,
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// Samples per pixel (1 for grayscale, 3 for RGB, 4 for RGBA)
    spp: u32,
    /// 32-bit words per line
    wpl: u32,
    /// X resolution (ppi), 0 if unknown
    xres: i32,
    /// Y resolution (ppi), 0 if unknown
    yres: i32,
    /// Input file format
    informat: ImageFormat,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl PixData {
    fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let wpl = compute_wpl(width, depth).ok_or(Error::InvalidDimension { width, height })?;
        let data_size = (wpl as usize)
            .checked_mul(height as usize)
            .filter(|&n| n <= isize::MAX as usize / 4)
            .ok_or(Error::InvalidDimension { width, height })?;

        let spp = match depth {
            PixelDepth::Bit32 => 3, // Default to RGB
            _ => 1,
        };

        Ok(PixData {
            width,
            height,
            depth,
            spp,
            wpl,
            xres: 0,
            yres: 0,
            informat: ImageFormat::Unknown,
            data: vec![0u32; data_size],
        })
    }
}

/// Compute words per line for given width and depth.
///
/// Returns `None` if the row would not fit in `u32` words.
#[inline]
fn compute_wpl(width: u32, depth: PixelDepth) -> Option<u32> {
    let bits_per_line = u64::from(width) * u64::from(depth.bits());
    u32::try_from(bits_per_line.div_ceil(32)).ok()
}

/// PIX - Raster image container
///
/// # Examples
///
/// ```
/// use textseg_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or if
    /// the image is too large to address.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::new(width, height, depth)?),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the X resolution (ppi).
    #[inline]
    pub fn xres(&self) -> i32 {
        self.inner.xres
    }

    /// Get the Y resolution (ppi).
    #[inline]
    pub fn yres(&self) -> i32 {
        self.inner.yres
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get the raw packed image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the packed words of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let wpl = self.inner.wpl as usize;
        let start = y as usize * wpl;
        &self.inner.data[start..start + wpl]
    }

    /// Check whether two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Count the foreground (ON) pixels of a 1 bpp image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 1 bpp.
    pub fn count_pixels(&self) -> Result<u64> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        // Pad bits are kept at zero, so whole-word popcount is exact.
        Ok(self
            .inner
            .data
            .iter()
            .map(|w| u64::from(w.count_ones()))
            .sum())
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(PixData::clone(&self.inner)),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData::clone(&self.inner),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zero-filled mutable image.
    ///
    /// # Errors
    ///
    /// Same as [`Pix::new`].
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::new(width, height, depth)?,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Set the samples per pixel.
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }

    /// Set both resolutions.
    pub fn set_resolution(&mut self, xres: i32, yres: i32) {
        self.inner.xres = xres;
        self.inner.yres = yres;
    }

    /// Copy the resolution of `src`.
    pub fn copy_resolution_from(&mut self, src: &Pix) {
        self.set_resolution(src.xres(), src.yres());
    }

    /// Record the file format the image was decoded from.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get the raw packed image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the raw packed image data.
    ///
    /// Callers writing whole words into a 1 bpp image must call
    /// [`PixMut::clear_pad_bits`] afterwards.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get the packed words of row `y`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let wpl = self.inner.wpl as usize;
        let start = y as usize * wpl;
        &mut self.inner.data[start..start + wpl]
    }

    /// Zero the bits past the image width in the last word of every row.
    pub fn clear_pad_bits(&mut self) {
        let used = (self.inner.width as u64 * self.inner.depth.bits() as u64 % 32) as u32;
        if used == 0 {
            return;
        }
        let mask = !0u32 << (32 - used);
        let wpl = self.inner.wpl as usize;
        for row in self.inner.data.chunks_exact_mut(wpl) {
            row[wpl - 1] &= mask;
        }
    }

    /// Set all pixels to their maximum value.
    pub fn set_all(&mut self) {
        self.inner.data.fill(u32::MAX);
        self.clear_pad_bits();
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.spp(), 1);
        assert_eq!(pix.wpl(), 25);
    }

    #[test]
    fn test_pix_zero_dimension() {
        assert!(matches!(
            Pix::new(0, 10, PixelDepth::Bit8),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(Pix::new(10, 0, PixelDepth::Bit1).is_err());
    }

    #[test]
    fn test_wpl_per_depth() {
        assert_eq!(compute_wpl(33, PixelDepth::Bit1), Some(2));
        assert_eq!(compute_wpl(5, PixelDepth::Bit8), Some(2));
        assert_eq!(compute_wpl(5, PixelDepth::Bit32), Some(5));
    }

    #[test]
    fn test_new_rejects_unaddressable_size() {
        assert!(matches!(
            Pix::new(u32::MAX, u32::MAX, PixelDepth::Bit32),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            PixMut::new(u32::MAX, 1 << 31, PixelDepth::Bit8),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_set_all_keeps_pad_bits_clear() {
        let mut pm = PixMut::new(35, 3, PixelDepth::Bit1).unwrap();
        pm.set_all();
        let pix: Pix = pm.into();
        assert_eq!(pix.count_pixels().unwrap(), 35 * 3);
    }

    #[test]
    fn test_to_mut_is_independent() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let mut pm = pix.to_mut();
        pm.set_pixel(1, 1, 200).unwrap();
        let modified: Pix = pm.into();
        assert_eq!(pix.get_pixel(1, 1), Some(0));
        assert_eq!(modified.get_pixel(1, 1), Some(200));
    }
}
