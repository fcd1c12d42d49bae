//! textseg-color - Grayscale to binary conversion
//!
//! - **Thresholding** ([`threshold`]): fixed threshold, Otsu's method and
//!   adaptive (local-mean) thresholding
//!
//! Every function here produces a 1 bpp mask where 1 is foreground (ink).

pub mod error;
pub mod threshold;

pub use error::{ColorError, ColorResult};

pub use threshold::{
    // Types
    AdaptiveMethod,
    AdaptiveThresholdOptions,
    // Functions
    adaptive_threshold,
    compute_otsu_threshold,
    gaussian_sigma_for_window,
    threshold_otsu,
    threshold_to_binary,
};
