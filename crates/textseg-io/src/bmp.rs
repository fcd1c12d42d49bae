//! BMP image format support
//!
//! Reads uncompressed Windows Bitmap files at 1, 4, 8, 24 and 32 bpp.
//! Palette images are expanded: an all-gray palette gives 8 bpp, any
//! other palette gives 32 bpp RGB.

use crate::{IoError, IoResult, read_raster};
use std::io::Read;
use textseg_core::{ImageFormat, Pix, PixMut, PixelDepth, color};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn skip<R: Read>(reader: &mut R, n: usize) -> IoResult<()> {
    let copied = std::io::copy(&mut reader.by_ref().take(n as u64), &mut std::io::sink())?;
    if copied < n as u64 {
        return Err(IoError::InvalidData("BMP truncated".to_string()));
    }
    Ok(())
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;
    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }
    let pixel_offset = le_u32(&file_header, 10) as usize;

    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header)?;

    let header_size = le_u32(&info_header, 0);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_u32(&info_header, 4) as i32;
    let height = le_u32(&info_header, 8) as i32;
    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }
    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);
    // BI_RGB, or BI_BITFIELDS with the default masks
    if compression != 0 && compression != 3 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }
    let colors_used = le_u32(&info_header, 32) as usize;
    // pixels per meter
    let xres = (le_u32(&info_header, 24) as f64 * 0.0254 + 0.5) as i32;
    let yres = (le_u32(&info_header, 28) as f64 * 0.0254 + 0.5) as i32;

    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    skip(&mut reader, (header_size - BMP_INFO_HEADER_SIZE) as usize)?;

    let palette: Vec<(u8, u8, u8)> = if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let num_colors = if colors_used == 0 {
            max_colors
        } else {
            colors_used.min(max_colors)
        };
        let mut raw = vec![0u8; num_colors * 4];
        reader.read_exact(&mut raw)?;
        raw.chunks_exact(4).map(|c| (c[2], c[1], c[0])).collect()
    } else {
        Vec::new()
    };

    let current_pos = BMP_FILE_HEADER_SIZE + header_size as usize + palette.len() * 4;
    if pixel_offset > current_pos {
        skip(&mut reader, pixel_offset - current_pos)?;
    }

    let gray_palette = palette.iter().all(|&(r, g, b)| r == g && g == b);
    let depth = if bits_per_pixel <= 8 && gray_palette {
        PixelDepth::Bit8
    } else {
        PixelDepth::Bit32
    };

    // BMP rows are 4-byte aligned
    let row_stride = (u64::from(width) * u64::from(bits_per_pixel)).div_ceil(32) * 4;
    let raster = read_raster(&mut reader, width, height, row_stride)?;

    let mut pix_mut = PixMut::new(width, height, depth)?;
    pix_mut.set_informat(ImageFormat::Bmp);
    pix_mut.set_resolution(xres, yres);

    let lookup = |index: u8| -> IoResult<u32> {
        let &(r, g, b) = palette.get(index as usize).ok_or_else(|| {
            IoError::InvalidData(format!("BMP palette index {} out of range", index))
        })?;
        Ok(if gray_palette {
            r as u32
        } else {
            color::compose_rgb(r, g, b)
        })
    };

    for (row, row_buffer) in (0..height).zip(raster.chunks_exact(row_stride as usize)) {
        let y = if top_down { row } else { height - 1 - row };

        for x in 0..width {
            let xi = x as usize;
            let val = match bits_per_pixel {
                1 => lookup((row_buffer[xi / 8] >> (7 - (xi % 8))) & 1)?,
                4 => {
                    let shift = if xi % 2 == 0 { 4 } else { 0 };
                    lookup((row_buffer[xi / 2] >> shift) & 0xF)?
                }
                8 => lookup(row_buffer[xi])?,
                24 => {
                    let p = &row_buffer[xi * 3..];
                    color::compose_rgb(p[2], p[1], p[0])
                }
                _ => {
                    let p = &row_buffer[xi * 4..];
                    color::compose_rgb(p[2], p[1], p[0])
                }
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a bottom-up 8 bpp BMP with the given palette and rows.
    fn bmp_8bpp(width: u32, rows: &[&[u8]], palette: &[(u8, u8, u8)]) -> Vec<u8> {
        let stride = (width as usize).div_ceil(4) * 4;
        let offset = 14 + 40 + palette.len() * 4;
        let size = offset + stride * rows.len();
        let mut out = Vec::with_capacity(size);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(size as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&(width as i32).to_le_bytes());
        out.extend_from_slice(&(rows.len() as i32).to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&8u16.to_le_bytes());
        out.extend_from_slice(&[0; 16]);
        out.extend_from_slice(&(palette.len() as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        for &(r, g, b) in palette {
            out.extend_from_slice(&[b, g, r, 0]);
        }
        for row in rows.iter().rev() {
            out.extend_from_slice(row);
            out.resize(out.len() + stride - row.len(), 0);
        }
        out
    }

    #[test]
    fn test_read_gray_palette() {
        let data = bmp_8bpp(3, &[&[0, 1, 1], &[1, 0, 0]], &[(0, 0, 0), (255, 255, 255)]);
        let pix = read_bmp(&data[..]).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!((pix.width(), pix.height()), (3, 2));
        assert_eq!(pix.get_pixel(0, 0), Some(0));
        assert_eq!(pix.get_pixel(1, 0), Some(255));
        assert_eq!(pix.get_pixel(0, 1), Some(255));
    }

    #[test]
    fn test_read_color_palette() {
        let data = bmp_8bpp(1, &[&[1]], &[(0, 0, 0), (200, 10, 20)]);
        let pix = read_bmp(&data[..]).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit32);
        assert_eq!(pix.get_rgb(0, 0), Some((200, 10, 20)));
    }

    #[test]
    fn test_truncated_or_oversized_raster() {
        let mut data = bmp_8bpp(4, &[&[0, 1, 1, 0], &[1, 0, 0, 1]], &[(0, 0, 0), (255, 255, 255)]);
        data.truncate(data.len() - 2);
        assert!(matches!(read_bmp(&data[..]), Err(IoError::InvalidData(_))));

        // 2^31 x 2^31 claimed by the header, no pixel data
        let mut data = bmp_8bpp(1, &[&[0]], &[(0, 0, 0)]);
        data.truncate(14 + 40 + 4);
        data[18..22].copy_from_slice(&0x7fff_ffffu32.to_le_bytes());
        data[22..26].copy_from_slice(&0x7fff_ffffu32.to_le_bytes());
        assert!(matches!(read_bmp(&data[..]), Err(IoError::InvalidData(_))));
    }

    #[test]
    fn test_palette_index_out_of_range() {
        let data = bmp_8bpp(1, &[&[5]], &[(0, 0, 0)]);
        assert!(matches!(read_bmp(&data[..]), Err(IoError::InvalidData(_))));
    }
}
