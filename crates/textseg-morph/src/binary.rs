//! Binary morphological operations
//!
//! Implements dilation, erosion and closing for 1-bpp images.
//!
//! Both operations work a full 32-bit word at a time: for every hit of the
//! structuring element the source row is shifted by the hit offset and
//! OR-ed (dilation) or AND-ed (erosion) into the destination row.
//!
//! Conventions, for a hit at offset `(dx, dy)` from the origin:
//!   - dilation: `dst(x, y) |= src(x - dx, y - dy)`
//!   - erosion:  `dst(x, y) &= src(x + dx, y + dy)`
//!
//! Pixels outside the image are background for both, so plain erosion
//! clears foreground within reach of the border. [`close_safe_brick_iter`]
//! pads the image first to avoid that.

use crate::{MorphError, MorphResult, Sel};
use textseg_core::{Pix, PixMut, PixelDepth};

/// Dilate a binary image
///
/// Dilation expands foreground regions by the shape of the SEL.
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;

    let h = pix.height() as i32;
    let wpl = pix.wpl() as usize;
    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit1)?;
    out.copy_resolution_from(pix);

    let src_data = pix.data();
    let dst_data = out.data_mut();

    for (dx, dy) in sel.hit_offsets() {
        for y in 0..h {
            let src_y = y - dy;
            if src_y < 0 || src_y >= h {
                continue;
            }
            let src_start = src_y as usize * wpl;
            let dst_start = y as usize * wpl;
            shift_or_row(
                &mut dst_data[dst_start..dst_start + wpl],
                &src_data[src_start..src_start + wpl],
                dx,
            );
        }
    }

    // Shifting right carries bits past the image width.
    out.clear_pad_bits();
    Ok(out.into())
}

/// Erode a binary image
///
/// Erosion keeps a pixel only if every hit of the SEL, placed at that
/// pixel, lands on foreground.
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;

    let h = pix.height() as i32;
    let wpl = pix.wpl() as usize;
    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit1)?;
    out.copy_resolution_from(pix);
    out.set_all();

    let src_data = pix.data();
    let dst_data = out.data_mut();

    for (dx, dy) in sel.hit_offsets() {
        for y in 0..h {
            let src_y = y + dy;
            let dst_start = y as usize * wpl;
            let dst_row = &mut dst_data[dst_start..dst_start + wpl];
            if src_y < 0 || src_y >= h {
                dst_row.fill(0);
                continue;
            }
            let src_start = src_y as usize * wpl;
            shift_and_row(dst_row, &src_data[src_start..src_start + wpl], -dx);
        }
    }

    out.clear_pad_bits();
    Ok(out.into())
}

/// Close a binary image
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and gaps narrower than the SEL.
pub fn close(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate(pix, sel)?;
    erode(&dilated, sel)
}

/// Dilate with a brick (rectangular) structuring element
///
/// The brick is separable: a horizontal line dilation followed by a
/// vertical one gives the same result with `width + height` shifts instead
/// of `width * height`.
pub fn dilate_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    check_brick(width, height)?;
    let mut result = pix.clone();
    if width > 1 {
        result = dilate(&result, &Sel::create_horizontal(width)?)?;
    }
    if height > 1 {
        result = dilate(&result, &Sel::create_vertical(height)?)?;
    }
    Ok(result)
}

/// Erode with a brick (rectangular) structuring element
pub fn erode_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    check_brick(width, height)?;
    let mut result = pix.clone();
    if width > 1 {
        result = erode(&result, &Sel::create_horizontal(width)?)?;
    }
    if height > 1 {
        result = erode(&result, &Sel::create_vertical(height)?)?;
    }
    Ok(result)
}

/// Close a binary image safely using a brick structuring element.
///
/// Same as [`close_safe_brick_iter`] with one iteration.
pub fn close_safe_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    close_safe_brick_iter(pix, width, height, 1)
}

/// Iterated border-safe closing with a brick.
///
/// Applies `iterations` dilations followed by `iterations` erosions with a
/// `width x height` brick (origin at `(width / 2, height / 2)`). The image
/// is first padded with background by the total translation of all
/// dilations, so the erosions never see the image edge, and the pad is
/// removed afterwards.
///
/// # Arguments
/// * `pix` - 1 bpp input image
/// * `width` - Horizontal size of the brick (>= 1)
/// * `height` - Vertical size of the brick (>= 1)
/// * `iterations` - Number of dilations, and of erosions (>= 1)
///
/// A 1x1 brick is the identity.
pub fn close_safe_brick_iter(
    pix: &Pix,
    width: u32,
    height: u32,
    iterations: u32,
) -> MorphResult<Pix> {
    check_binary(pix)?;
    check_brick(width, height)?;
    if iterations == 0 {
        return Err(MorphError::InvalidParameters(
            "iterations must be at least 1".to_string(),
        ));
    }
    if width == 1 && height == 1 {
        return Ok(pix.clone());
    }

    let (xp, yp, xn, yn) = Sel::create_brick(width, height)?.find_max_translations();
    let xbord = xp.max(xn) * iterations;
    let ybord = yp.max(yn) * iterations;

    let mut work = pix.add_border_general(xbord, xbord, ybord, ybord, 0)?;
    for _ in 0..iterations {
        work = dilate_brick(&work, width, height)?;
    }
    for _ in 0..iterations {
        work = erode_brick(&work, width, height)?;
    }
    Ok(work.remove_border_general(xbord, xbord, ybord, ybord)?)
}

/// Word `i` of `src` after moving the row content `shift` pixels.
///
/// MSB-first bit ordering: pixel 0 = bit 31 of word 0. Positive shift moves
/// content right (toward higher x), negative shift moves it left. Bits
/// shifted in from outside the row are 0.
#[inline]
fn shifted_word(src: &[u32], i: usize, shift: i32) -> u32 {
    let word = |idx: isize| -> u32 {
        if idx < 0 || idx as usize >= src.len() {
            0
        } else {
            src[idx as usize]
        }
    };

    let abs_shift = shift.unsigned_abs() as usize;
    let word_shift = (abs_shift / 32) as isize;
    let bit_shift = (abs_shift % 32) as u32;
    let i = i as isize;

    if shift >= 0 {
        let base = word(i - word_shift);
        if bit_shift == 0 {
            base
        } else {
            (base >> bit_shift) | (word(i - word_shift - 1) << (32 - bit_shift))
        }
    } else {
        let base = word(i + word_shift);
        if bit_shift == 0 {
            base
        } else {
            (base << bit_shift) | (word(i + word_shift + 1) >> (32 - bit_shift))
        }
    }
}

/// Shift src row by `shift` pixels and OR into dst.
fn shift_or_row(dst: &mut [u32], src: &[u32], shift: i32) {
    for (i, d) in dst.iter_mut().enumerate() {
        *d |= shifted_word(src, i, shift);
    }
}

/// Shift src row by `shift` pixels and AND into dst.
///
/// Positions shifted in from outside the row are 0 and clear dst.
fn shift_and_row(dst: &mut [u32], src: &[u32], shift: i32) {
    for (i, d) in dst.iter_mut().enumerate() {
        *d &= shifted_word(src, i, shift);
    }
}

fn check_brick(width: u32, height: u32) -> MorphResult<()> {
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidParameters(format!(
            "brick size must be at least 1x1, got {width}x{height}"
        )));
    }
    Ok(())
}

/// Check that the image is binary (1-bpp)
fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
