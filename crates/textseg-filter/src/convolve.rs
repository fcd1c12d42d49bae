//! Separable convolution
//!
//! Used for the Gaussian-weighted local mean of adaptive thresholding.

use crate::block_conv::check_8bpp;
use crate::{FilterError, FilterResult, Kernel};
use rayon::prelude::*;
use textseg_core::Pix;

/// Convolve an 8 bpp image with a horizontal then a vertical 1D kernel.
///
/// `kernel_x` must be `n x 1` and `kernel_y` must be `1 x m`, or `n x 1`
/// in which case it is applied transposed. The intermediate stays in
/// `f32`; the result is rounded and clamped to 0..=255. Borders replicate.
pub fn convolve_sep_gray(pix: &Pix, kernel_x: &Kernel, kernel_y: &Kernel) -> FilterResult<Pix> {
    check_8bpp(pix)?;
    if kernel_x.height() != 1 {
        return Err(FilterError::InvalidKernel(
            "horizontal kernel must have height 1".to_string(),
        ));
    }
    let (ky_data, ky_center) = if kernel_y.width() == 1 {
        (kernel_y.data(), kernel_y.center_y() as i32)
    } else if kernel_y.height() == 1 {
        (kernel_y.data(), kernel_y.center_x() as i32)
    } else {
        return Err(FilterError::InvalidKernel(
            "vertical kernel must be one-dimensional".to_string(),
        ));
    };
    let kx_data = kernel_x.data();
    let kx_center = kernel_x.center_x() as i32;

    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let src = pix.to_gray_bytes()?;

    let mut tmp = vec![0.0f32; w * h];
    tmp.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        let line = &src[y * w..(y + 1) * w];
        for (x, out) in row.iter_mut().enumerate() {
            *out = kx_data
                .iter()
                .enumerate()
                .map(|(k, &wt)| {
                    let sx = (x as i32 + k as i32 - kx_center).clamp(0, w as i32 - 1);
                    wt * line[sx as usize] as f32
                })
                .sum();
        }
    });

    let mut dst = vec![0u8; w * h];
    dst.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            let v: f32 = ky_data
                .iter()
                .enumerate()
                .map(|(k, &wt)| {
                    let sy = (y as i32 + k as i32 - ky_center).clamp(0, h as i32 - 1);
                    wt * tmp[sy as usize * w + x]
                })
                .sum();
            *out = (v + 0.5).clamp(0.0, 255.0) as u8;
        }
    });

    Ok(Pix::from_gray_bytes(pix.width(), pix.height(), &dst)?)
}

/// Gaussian blur of an 8 bpp image with a `size x size` window.
///
/// # Errors
///
/// Returns an error if `size` is even or `sigma <= 0`.
pub fn gaussian_blur(pix: &Pix, size: u32, sigma: f32) -> FilterResult<Pix> {
    let kernel = Kernel::gaussian_1d(size, sigma)?;
    convolve_sep_gray(pix, &kernel, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_blur_uniform_is_unchanged() {
        let pix = Pix::from_gray_bytes(10, 6, &[180; 60]).unwrap();
        let out = gaussian_blur(&pix, 5, 1.1).unwrap();
        assert_eq!(out.to_gray_bytes().unwrap(), vec![180; 60]);
    }

    #[test]
    fn test_gaussian_blur_spreads_dot() {
        let mut bytes = vec![0u8; 49];
        bytes[24] = 255;
        let pix = Pix::from_gray_bytes(7, 7, &bytes).unwrap();
        let out = gaussian_blur(&pix, 3, 0.8).unwrap();
        let center = out.get_pixel(3, 3).unwrap();
        let side = out.get_pixel(4, 3).unwrap();
        let corner = out.get_pixel(4, 4).unwrap();
        assert!(center > side && side > corner && corner > 0);
        assert_eq!(out.get_pixel(0, 0), Some(0));
        assert_eq!(out.get_pixel(2, 3), Some(side));
    }

    #[test]
    fn test_convolve_sep_rejects_2d_kernel() {
        let pix = Pix::from_gray_bytes(3, 3, &[0; 9]).unwrap();
        let k2 = Kernel::gaussian(3, 1.0).unwrap();
        let k1 = Kernel::gaussian_1d(3, 1.0).unwrap();
        assert!(convolve_sep_gray(&pix, &k2, &k1).is_err());
        assert!(convolve_sep_gray(&pix, &k1, &k2).is_err());
    }
}
