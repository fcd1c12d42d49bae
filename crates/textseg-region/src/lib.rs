//! textseg-region - Region extraction from binary masks
//!
//! This crate provides:
//!
//! - **Connected component analysis** - labeling foreground components and
//!   reporting the outermost ones as bounding boxes
//! - **Seed fill operations** - flood fill and the exterior background of
//!   a mask
//!
//! # Examples
//!
//! ```
//! use textseg_region::find_outer_components;
//! use textseg_core::{PixMut, PixelDepth};
//!
//! let mut pix_mut = PixMut::new(100, 100, PixelDepth::Bit1).unwrap();
//! pix_mut.fill_rect(10, 10, 30, 20, 1);
//! pix_mut.fill_rect(60, 60, 5, 5, 1);
//!
//! let boxes = find_outer_components(&pix_mut.into()).unwrap();
//! assert_eq!(boxes.len(), 2);
//! assert_eq!(boxes.get(0).unwrap().w, 30);
//! ```

pub mod conncomp;
mod error;
pub mod seedfill;

pub use conncomp::{
    ConnectedComponent, ConnectivityType, find_connected_components, find_outer_components,
};
pub use error::{RegionError, RegionResult};
pub use seedfill::{exterior_background, floodfill};
