//! Seed fill operations
//!
//! Flood fill on binary images, and the exterior background of a mask: the
//! background pixels that can reach the image border through 4-connected
//! background. Everything else that is background lies in a hole.

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use std::collections::VecDeque;
use textseg_core::{Pix, PixMut, PixelDepth};

fn check_binary(depth: PixelDepth) -> RegionResult<()> {
    if depth != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1-bit",
            actual: depth.bits(),
        });
    }
    Ok(())
}

/// Flood fill in a binary image starting from a seed point
///
/// Fills the connected region of the seed's value with `new_value`,
/// modifying the image in place.
///
/// # Returns
///
/// The number of pixels that were filled; 0 if the seed already holds
/// `new_value`.
///
/// # Errors
///
/// Returns an error if the seed position is out of bounds or the image is
/// not 1 bpp.
pub fn floodfill(
    pix: &mut PixMut,
    seed_x: u32,
    seed_y: u32,
    new_value: u32,
    connectivity: ConnectivityType,
) -> RegionResult<u32> {
    check_binary(pix.depth())?;

    let width = pix.width();
    let height = pix.height();
    if seed_x >= width || seed_y >= height {
        return Err(RegionError::InvalidSeed {
            x: seed_x,
            y: seed_y,
        });
    }

    let old_value = pix.get_pixel_unchecked(seed_x, seed_y);
    let new_value = new_value & 1;
    if old_value == new_value {
        return Ok(0);
    }

    let mut filled_count = 0u32;
    let mut queue = VecDeque::new();
    pix.set_pixel_unchecked(seed_x, seed_y, new_value);
    queue.push_back((seed_x, seed_y));

    // Pixels are filled when queued, so each one is queued at most once.
    while let Some((x, y)) = queue.pop_front() {
        filled_count += 1;
        for (nx, ny) in connectivity.neighbors(x, y, width, height) {
            if pix.get_pixel_unchecked(nx, ny) == old_value {
                pix.set_pixel_unchecked(nx, ny, new_value);
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(filled_count)
}

/// Mask of the exterior background of a binary image.
///
/// Returns a 1 bpp image of the same size in which a pixel is set iff it
/// is background in `pix` and is 4-connected through background to the
/// image border. 4-connected background is the dual of 8-connected
/// foreground: a closed 8-connected ring of foreground separates its hole
/// from the exterior.
pub fn exterior_background(pix: &Pix) -> RegionResult<Pix> {
    check_binary(pix.depth())?;

    let width = pix.width();
    let height = pix.height();

    // Fill the border-connected background with 1; afterwards the filled
    // image is foreground plus exterior background.
    let mut filled = pix.to_mut();
    let border = (0..width)
        .flat_map(|x| [(x, 0), (x, height - 1)])
        .chain((0..height).flat_map(|y| [(0, y), (width - 1, y)]));
    for (x, y) in border {
        if filled.get_pixel_unchecked(x, y) == 0 {
            floodfill(&mut filled, x, y, 1, ConnectivityType::FourWay)?;
        }
    }

    let filled: Pix = filled.into();
    let mut out = PixMut::new(width, height, PixelDepth::Bit1)?;
    for y in 0..height {
        let src = pix.row_data(y);
        for (d, (&f, &s)) in out
            .row_data_mut(y)
            .iter_mut()
            .zip(filled.row_data(y).iter().zip(src))
        {
            *d = f & !s;
        }
    }
    out.clear_pad_bits();
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 9x9 image with a closed 1-pixel ring from (2,2) to (6,6).
    fn ring() -> Pix {
        let mut pm = PixMut::new(9, 9, PixelDepth::Bit1).unwrap();
        for i in 2..=6 {
            pm.set_pixel_unchecked(i, 2, 1);
            pm.set_pixel_unchecked(i, 6, 1);
            pm.set_pixel_unchecked(2, i, 1);
            pm.set_pixel_unchecked(6, i, 1);
        }
        pm.into()
    }

    #[test]
    fn test_floodfill_all() {
        let mut pm = PixMut::new(10, 10, PixelDepth::Bit1).unwrap();
        let count = floodfill(&mut pm, 5, 5, 1, ConnectivityType::FourWay).unwrap();
        assert_eq!(count, 100);
        assert_eq!(floodfill(&mut pm, 0, 0, 1, ConnectivityType::FourWay).unwrap(), 0);
    }

    #[test]
    fn test_floodfill_stops_at_ring() {
        let mut pm = ring().to_mut();
        let count = floodfill(&mut pm, 4, 4, 1, ConnectivityType::FourWay).unwrap();
        assert_eq!(count, 9);
        assert_eq!(pm.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_floodfill_diagonal_leak() {
        // Two pixels touching only at a corner.
        let mut pm = PixMut::new(3, 3, PixelDepth::Bit1).unwrap();
        pm.set_pixel_unchecked(0, 0, 1);
        pm.set_pixel_unchecked(1, 1, 1);
        let pix: Pix = pm.into();
        let mut four = pix.to_mut();
        assert_eq!(floodfill(&mut four, 0, 0, 0, ConnectivityType::FourWay).unwrap(), 1);
        let mut eight = pix.to_mut();
        assert_eq!(floodfill(&mut eight, 0, 0, 0, ConnectivityType::EightWay).unwrap(), 2);
    }

    #[test]
    fn test_floodfill_invalid_seed() {
        let mut pm = PixMut::new(4, 4, PixelDepth::Bit1).unwrap();
        assert!(matches!(
            floodfill(&mut pm, 4, 0, 1, ConnectivityType::FourWay),
            Err(RegionError::InvalidSeed { x: 4, y: 0 })
        ));
    }

    #[test]
    fn test_exterior_background_excludes_hole() {
        let ext = exterior_background(&ring()).unwrap();
        assert_eq!(ext.get_pixel(0, 0), Some(1));
        assert_eq!(ext.get_pixel(7, 4), Some(1));
        assert_eq!(ext.get_pixel(2, 2), Some(0)); // foreground
        assert_eq!(ext.get_pixel(4, 4), Some(0)); // hole
        // 81 pixels - 16 ring - 9 hole
        assert_eq!(ext.count_pixels().unwrap(), 56);
    }

    #[test]
    fn test_exterior_background_depth() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(exterior_background(&pix).is_err());
    }
}
