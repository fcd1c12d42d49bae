//! Binary thresholding
//!
//! Converts 8 bpp grayscale images to 1 bpp masks:
//! - Fixed threshold binarization
//! - Otsu's method (automatic global threshold selection)
//! - Adaptive (local) thresholding against a Gaussian or box mean
//!
//! In every mask a set bit is foreground. Dark ink on light paper maps to
//! foreground.

use crate::{ColorError, ColorResult};
use serde::{Deserialize, Serialize};
use textseg_core::pix::set_data_bit;
use textseg_core::{Pix, PixMut, PixelDepth};
use textseg_filter::{blockconv_gray, gaussian_blur};

/// Options for adaptive thresholding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveThresholdOptions {
    /// Size of the local window (odd, at least 3)
    pub window_size: u32,
    /// Constant subtracted from the mean
    pub c: f32,
    /// Method for computing local threshold
    pub method: AdaptiveMethod,
}

/// Method for adaptive threshold computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptiveMethod {
    /// Use mean of local window
    Mean,
    /// Use Gaussian-weighted mean
    Gaussian,
}

impl Default for AdaptiveThresholdOptions {
    fn default() -> Self {
        Self {
            window_size: 35,
            c: 15.0,
            method: AdaptiveMethod::Gaussian,
        }
    }
}

impl AdaptiveThresholdOptions {
    pub fn with_window_size(mut self, size: u32) -> Self {
        self.window_size = size;
        self
    }

    pub fn with_c(mut self, c: f32) -> Self {
        self.c = c;
        self
    }

    pub fn with_method(mut self, method: AdaptiveMethod) -> Self {
        self.method = method;
        self
    }

    fn validate(&self) -> ColorResult<()> {
        if self.window_size < 3 || self.window_size % 2 == 0 {
            return Err(ColorError::InvalidParameters(format!(
                "window size must be odd and >= 3, got {}",
                self.window_size
            )));
        }
        if !self.c.is_finite() {
            return Err(ColorError::InvalidParameters(
                "c must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Standard deviation of the Gaussian window used for a given window size.
///
/// `sigma = 0.3 * ((size - 1) * 0.5 - 1) + 0.8`
pub fn gaussian_sigma_for_window(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn check_8bpp(pix: &Pix) -> ColorResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8-bpp grayscale",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Build a 1 bpp mask the size of `pix` from a per-pixel predicate on the
/// row-major gray bytes.
fn mask_from<F>(pix: &Pix, is_fg: F) -> ColorResult<Pix>
where
    F: Fn(usize, u8) -> bool,
{
    let w = pix.width() as usize;
    let bytes = pix.to_gray_bytes()?;
    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit1)?;
    out.copy_resolution_from(pix);

    for (y, row) in bytes.chunks_exact(w).enumerate() {
        let line = out.row_data_mut(y as u32);
        for (x, &v) in row.iter().enumerate() {
            if is_fg(y * w + x, v) {
                set_data_bit(line, x as u32, 1);
            }
        }
    }

    Ok(out.into())
}

/// Convert a grayscale image to binary using a fixed threshold
///
/// Pixels < threshold become foreground (1), pixels >= threshold become
/// background (0).
pub fn threshold_to_binary(pix: &Pix, threshold: u8) -> ColorResult<Pix> {
    check_8bpp(pix)?;
    mask_from(pix, |_, v| v < threshold)
}

/// Compute Otsu's threshold for a grayscale image
///
/// Returns the value `t` maximizing the between-class variance of the
/// classes `[0, t]` and `(t, 255]`. An image with a single gray level has
/// no split and returns 0.
pub fn compute_otsu_threshold(pix: &Pix) -> ColorResult<u8> {
    check_8bpp(pix)?;
    let bytes = pix.to_gray_bytes()?;

    let mut histogram = [0u64; 256];
    for &v in &bytes {
        histogram[v as usize] += 1;
    }

    let total = bytes.len() as f64;
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &n)| i as f64 * n as f64)
        .sum();

    let mut best_threshold = 0u8;
    let mut best_variance = 0.0f64;
    let mut w0 = 0.0f64;
    let mut sum0 = 0.0f64;

    for (t, &n) in histogram.iter().enumerate() {
        w0 += n as f64;
        sum0 += t as f64 * n as f64;
        if w0 == 0.0 {
            continue;
        }
        let w1 = total - w0;
        if w1 == 0.0 {
            break;
        }
        let m0 = sum0 / w0;
        let m1 = (sum_all - sum0) / w1;
        let variance = w0 * w1 * (m0 - m1) * (m0 - m1);
        if variance > best_variance {
            best_variance = variance;
            best_threshold = t as u8;
        }
    }

    Ok(best_threshold)
}

/// Convert a grayscale image to binary using Otsu's method
///
/// Pixels at or below the computed threshold become foreground. A uniform
/// image yields a mask with no foreground unless its single level is 0.
pub fn threshold_otsu(pix: &Pix) -> ColorResult<Pix> {
    let threshold = compute_otsu_threshold(pix)?;
    mask_from(pix, |_, v| v <= threshold)
}

/// Apply adaptive thresholding
///
/// A pixel is foreground iff its value is strictly below the local mean of
/// its `window_size x window_size` neighborhood minus `c`. The local mean
/// is rounded to 8 bits before the comparison.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] if the window is even or
/// smaller than 3, and [`ColorError::UnsupportedDepth`] if `pix` is not
/// 8 bpp.
pub fn adaptive_threshold(pix: &Pix, options: &AdaptiveThresholdOptions) -> ColorResult<Pix> {
    check_8bpp(pix)?;
    options.validate()?;

    let size = options.window_size;
    let mean = match options.method {
        AdaptiveMethod::Gaussian => gaussian_blur(pix, size, gaussian_sigma_for_window(size))?,
        AdaptiveMethod::Mean => blockconv_gray(pix, size / 2, size / 2)?,
    };
    let mean = mean.to_gray_bytes()?;
    let c = options.c;

    mask_from(pix, |i, v| (v as f32) < mean[i] as f32 - c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level(w: u32, h: u32, split: u32, dark: u8, light: u8) -> Pix {
        let bytes: Vec<u8> = (0..w * h)
            .map(|i| if i % w < split { dark } else { light })
            .collect();
        Pix::from_gray_bytes(w, h, &bytes).unwrap()
    }

    #[test]
    fn test_threshold_to_binary() {
        let pix = two_level(8, 2, 3, 40, 200);
        let bin = threshold_to_binary(&pix, 128).unwrap();
        assert_eq!(bin.depth(), PixelDepth::Bit1);
        assert_eq!(bin.get_pixel(0, 0), Some(1));
        assert_eq!(bin.get_pixel(2, 1), Some(1));
        assert_eq!(bin.get_pixel(3, 0), Some(0));
        assert_eq!(bin.count_pixels().unwrap(), 6);
    }

    #[test]
    fn test_otsu_splits_two_levels() {
        let pix = two_level(10, 4, 4, 30, 220);
        let t = compute_otsu_threshold(&pix).unwrap();
        assert!((30..220).contains(&t), "threshold {}", t);

        let bin = threshold_otsu(&pix).unwrap();
        assert_eq!(bin.count_pixels().unwrap(), 16);
        assert_eq!(bin.get_pixel(3, 2), Some(1));
        assert_eq!(bin.get_pixel(4, 2), Some(0));
    }

    #[test]
    fn test_otsu_uniform_image() {
        let white = Pix::from_gray_bytes(5, 5, &[255; 25]).unwrap();
        assert_eq!(compute_otsu_threshold(&white).unwrap(), 0);
        assert_eq!(threshold_otsu(&white).unwrap().count_pixels().unwrap(), 0);

        let black = Pix::from_gray_bytes(5, 5, &[0; 25]).unwrap();
        assert_eq!(threshold_otsu(&black).unwrap().count_pixels().unwrap(), 25);
    }

    #[test]
    fn test_adaptive_uniform_has_no_foreground() {
        let pix = Pix::from_gray_bytes(40, 40, &[128; 1600]).unwrap();
        for method in [AdaptiveMethod::Gaussian, AdaptiveMethod::Mean] {
            let opts = AdaptiveThresholdOptions::default()
                .with_window_size(9)
                .with_method(method);
            let bin = adaptive_threshold(&pix, &opts).unwrap();
            assert_eq!(bin.count_pixels().unwrap(), 0);
        }
    }

    #[test]
    fn test_adaptive_dark_dot() {
        let mut bytes = vec![255u8; 21 * 21];
        bytes[10 * 21 + 10] = 0;
        let pix = Pix::from_gray_bytes(21, 21, &bytes).unwrap();
        let opts = AdaptiveThresholdOptions::default().with_window_size(7);
        let bin = adaptive_threshold(&pix, &opts).unwrap();
        assert_eq!(bin.get_pixel(10, 10), Some(1));
        assert_eq!(bin.count_pixels().unwrap(), 1);
    }

    #[test]
    fn test_adaptive_strict_comparison() {
        // 3x1 box mean of [0, 45, 90] at the center is 45; with c = 0 the
        // center pixel equals its threshold and stays background.
        let pix = Pix::from_gray_bytes(3, 1, &[0, 45, 90]).unwrap();
        let opts = AdaptiveThresholdOptions::default()
            .with_window_size(3)
            .with_c(0.0)
            .with_method(AdaptiveMethod::Mean);
        let bin = adaptive_threshold(&pix, &opts).unwrap();
        assert_eq!(bin.get_pixel(1, 0), Some(0));
        assert_eq!(bin.get_pixel(0, 0), Some(1));
    }

    #[test]
    fn test_adaptive_invalid_window() {
        let pix = Pix::from_gray_bytes(4, 4, &[0; 16]).unwrap();
        for size in [0, 1, 2, 4, 34] {
            let opts = AdaptiveThresholdOptions::default().with_window_size(size);
            assert!(matches!(
                adaptive_threshold(&pix, &opts),
                Err(ColorError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_gray() {
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            threshold_otsu(&pix),
            Err(ColorError::UnsupportedDepth { actual: 32, .. })
        ));
    }

    #[test]
    fn test_sigma_for_window() {
        assert!((gaussian_sigma_for_window(3) - 0.8).abs() < 1e-6);
        assert!((gaussian_sigma_for_window(35) - 5.6).abs() < 1e-5);
    }
}
