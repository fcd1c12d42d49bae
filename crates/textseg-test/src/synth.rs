//! Synthetic page builders
//!
//! Dark-on-light pages with known geometry. All builders return 8 bpp
//! images unless stated otherwise: 255 is paper, 0 is ink.

use crate::TestResult;
use textseg_core::{Box, Pix, PixMut, PixelDepth, color};

/// Paper value for 8 bpp pages
pub const PAPER: u32 = 255;
/// Ink value for 8 bpp pages
pub const INK: u32 = 0;

/// A page holding nothing but paper.
///
/// For 1 bpp the page is all background (0); for 32 bpp it is white RGB.
pub fn blank_page(width: u32, height: u32, depth: PixelDepth) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, depth)?;
    let paper = match depth {
        PixelDepth::Bit1 => 0,
        PixelDepth::Bit8 => PAPER,
        PixelDepth::Bit32 => color::compose_rgb(255, 255, 255),
    };
    pm.fill_rect(0, 0, width, height, paper);
    Ok(pm.into())
}

/// An 8 bpp white page with each of `blocks` filled solid black.
///
/// Blocks are clipped to the page.
pub fn page_with_blocks(width: u32, height: u32, blocks: &[Box]) -> TestResult<Pix> {
    let page = blank_page(width, height, PixelDepth::Bit8)?;
    let mut pm = page.to_mut();
    for b in blocks {
        fill_box(&mut pm, b, INK);
    }
    Ok(pm.into())
}

/// Draw lines of glyph-like dashes inside `area`.
///
/// Each line is `line_height` tall with `line_gap` of paper below it.
/// Glyphs are 6 px wide, 4 px apart, grouped into words of five glyphs
/// separated by 10 px. Every gap is narrower than the default merge brick,
/// so each line fuses into one region.
pub fn add_text_lines(page: &Pix, area: &Box, line_height: i32, line_gap: i32) -> Pix {
    const GLYPH_W: i32 = 6;
    const GLYPH_GAP: i32 = 4;
    const WORD_LEN: i32 = 5;
    const WORD_GAP: i32 = 10;

    let mut pm = page.to_mut();
    let ink = match page.depth() {
        PixelDepth::Bit1 => 1,
        PixelDepth::Bit8 => INK,
        PixelDepth::Bit32 => color::compose_rgb(0, 0, 0),
    };

    let mut y = area.y;
    while y + line_height <= area.bottom() {
        let mut x = area.x;
        let mut n = 0;
        while x + GLYPH_W <= area.right() {
            fill_box(&mut pm, &Box::new_unchecked(x, y, GLYPH_W, line_height), ink);
            n += 1;
            x += GLYPH_W + if n % WORD_LEN == 0 { WORD_GAP } else { GLYPH_GAP };
        }
        y += line_height + line_gap;
    }
    pm.into()
}

/// Replicate an 8 bpp gray page into 32 bpp RGB.
pub fn gray_to_rgb(page: &Pix) -> TestResult<Pix> {
    let mut pm = PixMut::new(page.width(), page.height(), PixelDepth::Bit32)?;
    for y in 0..page.height() {
        for x in 0..page.width() {
            let v = page.get_pixel_unchecked(x, y) as u8;
            pm.set_pixel_unchecked(x, y, color::compose_rgb(v, v, v));
        }
    }
    Ok(pm.into())
}

fn fill_box(pm: &mut PixMut, b: &Box, val: u32) {
    if let Some(c) = b.clip(pm.width() as i32, pm.height() as i32) {
        pm.fill_rect(c.x as u32, c.y as u32, c.w as u32, c.h as u32, val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_with_blocks() {
        let page = page_with_blocks(50, 40, &[Box::new_unchecked(10, 10, 5, 5)]).unwrap();
        assert_eq!(page.get_pixel(9, 10), Some(PAPER));
        assert_eq!(page.get_pixel(10, 10), Some(INK));
        assert_eq!(page.get_pixel(14, 14), Some(INK));
        assert_eq!(page.get_pixel(15, 14), Some(PAPER));
    }

    #[test]
    fn test_add_text_lines_stays_in_area() {
        let page = blank_page(200, 100, PixelDepth::Bit8).unwrap();
        let area = Box::new_unchecked(20, 10, 100, 50);
        let text = add_text_lines(&page, &area, 12, 8);
        for y in 0..100 {
            for x in 0..200 {
                if text.get_pixel(x, y) == Some(INK) {
                    assert!(area.contains_point(x as i32, y as i32));
                }
            }
        }
        // lines at y = 10 and y = 30; y = 50 would end past the area
        assert_eq!(text.get_pixel(20, 10), Some(INK));
        assert_eq!(text.get_pixel(20, 30), Some(INK));
        assert_eq!(text.get_pixel(20, 50), Some(PAPER));
    }

    #[test]
    fn test_gray_to_rgb() {
        let page = page_with_blocks(4, 4, &[Box::new_unchecked(0, 0, 1, 1)]).unwrap();
        let rgb = gray_to_rgb(&page).unwrap();
        assert_eq!(rgb.get_rgb(0, 0), Some((0, 0, 0)));
        assert_eq!(rgb.get_rgb(3, 3), Some((255, 255, 255)));
    }
}
