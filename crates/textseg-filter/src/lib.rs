//! textseg-filter - Image filtering operations
//!
//! Filters for 8 bpp grayscale pages:
//!
//! - Bilateral filtering (edge-preserving smoothing)
//! - Separable Gaussian blur
//! - Block averaging through an integral image

pub mod bilateral;
pub mod block_conv;
pub mod convolve;
mod error;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

pub use bilateral::{bilateral_gray, bilateral_gray_exact, make_range_kernel, make_spatial_kernel};
pub use block_conv::{IntegralImage, blockconv_gray};
pub use convolve::{convolve_sep_gray, gaussian_blur};
