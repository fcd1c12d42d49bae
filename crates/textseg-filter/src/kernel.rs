//! Convolution kernels
//!
//! A [`Kernel`] is a small row-major grid of `f32` weights with an origin.
//! The smoothing filters use 1D Gaussian kernels for separable passes and
//! 2D kernels for bilateral spatial weights.

use crate::{FilterError, FilterResult};

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a zero-filled kernel with the origin at its center.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if either dimension is 0.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be positive: {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![0.0; width as usize * height as usize],
        })
    }

    /// Create a kernel from row-major values.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values, got {}",
                kernel.data.len(),
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a normalized `size x size` Gaussian kernel.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is even or zero, or `sigma <= 0`.
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        let row = gaussian_weights(size, sigma)?;
        let mut kernel = Self::new(size, size)?;
        for (y, wy) in row.iter().enumerate() {
            for (x, wx) in row.iter().enumerate() {
                kernel.data[y * size as usize + x] = wy * wx;
            }
        }
        kernel.normalize();
        Ok(kernel)
    }

    /// Create a normalized horizontal (`size x 1`) Gaussian kernel.
    ///
    /// Apply it once along rows and, transposed, once along columns for a
    /// separable 2D blur.
    pub fn gaussian_1d(size: u32, sigma: f32) -> FilterResult<Self> {
        let row = gaussian_weights(size, sigma)?;
        let mut kernel = Self::from_slice(size, 1, &row)?;
        kernel.normalize();
        Ok(kernel)
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        (x < self.width && y < self.height)
            .then(|| self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel summing to zero is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() > f32::EPSILON {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

/// Unnormalized Gaussian weights `exp(-d^2 / 2 sigma^2)` for `d` in
/// `-size/2 ..= size/2`.
fn gaussian_weights(size: u32, sigma: f32) -> FilterResult<Vec<f32>> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "Gaussian kernel size must be odd, got {}",
            size
        )));
    }
    if sigma <= 0.0 {
        return Err(FilterError::InvalidParameters(
            "sigma must be positive".to_string(),
        ));
    }
    let half = (size / 2) as i32;
    let denom = 2.0 * sigma * sigma;
    Ok((-half..=half)
        .map(|d| (-((d * d) as f32) / denom).exp())
        .collect())
}
