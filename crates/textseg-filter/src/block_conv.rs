//! Block convolution using integral images (summed area tables)
//!
//! Block average filter that runs in O(1) per pixel regardless of the
//! window size, by precomputing an integral image.

use crate::{FilterError, FilterResult};
use textseg_core::{Pix, PixelDepth};

/// Validate that the input image is 8 bpp grayscale.
pub(crate) fn check_8bpp(pix: &Pix) -> FilterResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8-bpp grayscale",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Integral image of an 8 bpp image.
///
/// `sum(x, y)` is the sum of all source pixels in `[0, x) x [0, y)`, so the
/// table is one larger than the source in each direction. Sums are `u64`;
/// a page of any realistic size cannot overflow.
#[derive(Debug, Clone)]
pub struct IntegralImage {
    width: u32,
    height: u32,
    data: Vec<u64>,
}

impl IntegralImage {
    /// Build the integral image of `pix`.
    ///
    /// Recursion: `a(x+1, y+1) = v(x, y) + a(x, y+1) + a(x+1, y) - a(x, y)`
    pub fn new(pix: &Pix) -> FilterResult<Self> {
        check_8bpp(pix)?;
        let w = pix.width() as usize;
        let h = pix.height() as usize;
        let stride = w + 1;
        let src = pix.to_gray_bytes()?;
        let mut data = vec![0u64; stride * (h + 1)];

        for y in 0..h {
            let mut row_sum = 0u64;
            for x in 0..w {
                row_sum += u64::from(src[y * w + x]);
                data[(y + 1) * stride + x + 1] = data[y * stride + x + 1] + row_sum;
            }
        }

        Ok(Self {
            width: pix.width(),
            height: pix.height(),
            data,
        })
    }

    /// Sum of source pixels in `[x0, x1) x [y0, y1)`.
    ///
    /// Bounds are clamped to the image.
    pub fn rect_sum(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> u64 {
        let stride = self.width as usize + 1;
        let x1 = x1.min(self.width) as usize;
        let y1 = y1.min(self.height) as usize;
        let x0 = (x0 as usize).min(x1);
        let y0 = (y0 as usize).min(y1);
        self.data[y1 * stride + x1] + self.data[y0 * stride + x0]
            - self.data[y0 * stride + x1]
            - self.data[y1 * stride + x0]
    }
}

/// Block average of an 8 bpp image.
///
/// `wc` and `hc` are the half-width and half-height of the window; the full
/// window is `(2*wc + 1) x (2*hc + 1)`. Near the border the window is
/// clipped to the image and the average is taken over the pixels that
/// remain.
///
/// If either `wc` or `hc` is 0, returns a copy of the input.
pub fn blockconv_gray(pix: &Pix, wc: u32, hc: u32) -> FilterResult<Pix> {
    check_8bpp(pix)?;
    if wc == 0 || hc == 0 {
        return Ok(pix.deep_clone());
    }

    let w = pix.width();
    let h = pix.height();
    let acc = IntegralImage::new(pix)?;
    let mut out = Vec::with_capacity(w as usize * h as usize);

    for y in 0..h {
        let y0 = y.saturating_sub(hc);
        let y1 = (y + hc + 1).min(h);
        for x in 0..w {
            let x0 = x.saturating_sub(wc);
            let x1 = (x + wc + 1).min(w);
            let count = u64::from(x1 - x0) * u64::from(y1 - y0);
            let sum = acc.rect_sum(x0, y0, x1, y1);
            out.push(((sum + count / 2) / count).min(255) as u8);
        }
    }

    Ok(Pix::from_gray_bytes(w, h, &out)?)
}
