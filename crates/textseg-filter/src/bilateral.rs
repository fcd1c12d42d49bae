//! Bilateral filtering (edge-preserving smoothing)
//!
//! Each output pixel is a weighted average of its neighborhood where a
//! neighbor's weight is the product of
//! - a spatial Gaussian of its distance from the center pixel, and
//! - a range Gaussian of its intensity difference from the center pixel.
//!
//! Uniform paper is smoothed while the step between ink and paper
//! survives, which keeps the later local-mean threshold sharp.
//!
//! Rows are filtered in parallel with `rayon`; the result does not depend
//! on the thread count.
//!
//! # Example
//!
//! ```ignore
//! use textseg_filter::bilateral_gray;
//!
//! let smoothed = bilateral_gray(&gray, 3, 50.0, 50.0)?;
//! ```

use crate::{FilterError, FilterResult, Kernel};
use rayon::prelude::*;
use textseg_core::{Pix, PixelDepth};

/// Create a range kernel for bilateral filtering
///
/// Element `i` is the weight for an intensity difference of `i`. The value
/// at 0 is 1.0.
pub fn make_range_kernel(range_stdev: f32) -> FilterResult<[f32; 256]> {
    if range_stdev <= 0.0 {
        return Err(FilterError::InvalidParameters(
            "range_stdev must be positive".to_string(),
        ));
    }

    let mut kernel = [0.0f32; 256];
    let denom = 2.0 * range_stdev * range_stdev;

    for (i, val) in kernel.iter_mut().enumerate() {
        *val = (-(i as f32 * i as f32) / denom).exp();
    }

    Ok(kernel)
}

/// Create the circular spatial kernel of a bilateral filter.
///
/// The kernel is `(2 * radius + 1)` square. Taps farther than `radius`
/// from the center are 0; the rest are `exp(-d^2 / 2 stdev^2)`.
pub fn make_spatial_kernel(radius: u32, spatial_stdev: f32) -> FilterResult<Kernel> {
    if spatial_stdev <= 0.0 {
        return Err(FilterError::InvalidParameters(
            "spatial_stdev must be positive".to_string(),
        ));
    }
    let size = 2 * radius + 1;
    let mut kernel = Kernel::new(size, size)?;
    let r = radius as i32;
    let denom = 2.0 * spatial_stdev * spatial_stdev;
    for dy in -r..=r {
        for dx in -r..=r {
            let d2 = dx * dx + dy * dy;
            if d2 <= r * r {
                let w = (-(d2 as f32) / denom).exp();
                kernel.set((dx + r) as u32, (dy + r) as u32, w);
            }
        }
    }
    Ok(kernel)
}

/// Apply an exact bilateral filter to an 8 bpp grayscale image.
///
/// # Arguments
/// * `pix` - Input 8 bpp grayscale image
/// * `spatial_kernel` - 2D spatial weights, origin at the kernel center
/// * `range_kernel` - Optional 256-element range kernel. If `None`, the
///   filter degenerates to a normalized convolution with `spatial_kernel`.
///
/// Borders replicate the nearest edge pixel.
pub fn bilateral_gray_exact(
    pix: &Pix,
    spatial_kernel: &Kernel,
    range_kernel: Option<&[f32; 256]>,
) -> FilterResult<Pix> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8-bpp grayscale",
            actual: pix.depth().bits(),
        });
    }

    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let kcx = spatial_kernel.center_x() as i32;
    let kcy = spatial_kernel.center_y() as i32;

    let unit_range = [1.0f32; 256];
    let range = range_kernel.unwrap_or(&unit_range);

    // Only the nonzero taps contribute.
    let taps: Vec<(i32, i32, f32)> = (0..spatial_kernel.height())
        .flat_map(|ky| (0..spatial_kernel.width()).map(move |kx| (kx, ky)))
        .filter_map(|(kx, ky)| {
            let wt = spatial_kernel.get(kx, ky)?;
            (wt > 0.0).then_some((kx as i32 - kcx, ky as i32 - kcy, wt))
        })
        .collect();

    let src = pix.to_gray_bytes()?;
    let mut dst = vec![0u8; src.len()];

    dst.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            let center = src[y * w + x];
            let mut sum = 0.0f32;
            let mut weight_sum = 0.0f32;

            for &(dx, dy, spatial_weight) in &taps {
                let sx = (x as i32 + dx).clamp(0, w as i32 - 1) as usize;
                let sy = (y as i32 + dy).clamp(0, h as i32 - 1) as usize;
                let neighbor = src[sy * w + sx];
                let weight = spatial_weight * range[center.abs_diff(neighbor) as usize];
                sum += neighbor as f32 * weight;
                weight_sum += weight;
            }

            *out = if weight_sum > 0.0 {
                (sum / weight_sum + 0.5).min(255.0) as u8
            } else {
                center
            };
        }
    });

    Ok(Pix::from_gray_bytes(pix.width(), pix.height(), &dst)?)
}

/// Edge-preserving smoothing of an 8 bpp image.
///
/// # Arguments
/// * `radius` - Spatial radius; the window is `2 * radius + 1` wide.
///   A radius of 0 returns a copy.
/// * `spatial_stdev` - Standard deviation of the spatial Gaussian (> 0)
/// * `range_stdev` - Standard deviation of the range Gaussian (> 0)
pub fn bilateral_gray(
    pix: &Pix,
    radius: u32,
    spatial_stdev: f32,
    range_stdev: f32,
) -> FilterResult<Pix> {
    let spatial_kernel = make_spatial_kernel(radius, spatial_stdev)?;
    let range_kernel = make_range_kernel(range_stdev)?;
    if radius == 0 {
        return Ok(pix.deep_clone());
    }
    bilateral_gray_exact(pix, &spatial_kernel, Some(&range_kernel))
}
