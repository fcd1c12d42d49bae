//! textseg-morph - Binary morphology
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Binary dilation, erosion and closing on 1 bpp masks, computed with
//!   word-level shifts
//! - Border-safe iterated closing with a brick, used to merge the glyphs of
//!   a text block into one connected blob

pub mod binary;
mod error;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

pub use binary::{
    close, close_safe_brick, close_safe_brick_iter, dilate, dilate_brick, erode, erode_brick,
};
