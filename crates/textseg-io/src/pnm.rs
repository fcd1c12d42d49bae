//! PNM (Portable Any Map) format support
//!
//! Reads PBM (P4 binary), PGM (P5 binary) and PPM (P6 binary). PGM and PPM
//! with `maxval` other than 255 are rescaled to 8 bits per sample.

use crate::{IoError, IoResult, read_raster};
use std::io::BufRead;
use textseg_core::{ImageFormat, Pix, PixMut, PixelDepth, color};

/// Read a PNM image (P4/P5/P6) from a reader.
///
/// # Returns
/// A `Pix` at 1 bpp (PBM), 8 bpp (PGM), or 32 bpp (PPM).
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic)?;
    let kind = match &magic {
        b"P4" => 4,
        b"P5" => 5,
        b"P6" => 6,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {:?}",
                String::from_utf8_lossy(&magic)
            )));
        }
    };

    let width = read_header_value(&mut reader)?;
    let height = read_header_value(&mut reader)?;
    let maxval = if kind == 4 {
        1
    } else {
        read_header_value(&mut reader)?
    };
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("PNM maxval {} out of range", maxval)));
    }

    let depth = match kind {
        4 => PixelDepth::Bit1,
        5 => PixelDepth::Bit8,
        _ => PixelDepth::Bit32,
    };
    let channels: u32 = match kind {
        4 => 0,
        5 => 1,
        _ => 3,
    };
    let bytes_per_sample: u32 = if maxval > 255 { 2 } else { 1 };
    let row_bytes = if kind == 4 {
        u64::from(width.div_ceil(8))
    } else {
        u64::from(width) * u64::from(channels * bytes_per_sample)
    };
    let raster = read_raster(&mut reader, width, height, row_bytes)?;

    let mut pix_mut = PixMut::new(width, height, depth)?;
    pix_mut.set_informat(ImageFormat::Pnm);
    let rows = raster.chunks_exact(row_bytes as usize);

    if kind == 4 {
        for (y, row) in (0..height).zip(rows) {
            for x in 0..width {
                let bit = (row[(x / 8) as usize] >> (7 - (x % 8))) & 1;
                pix_mut.set_pixel_unchecked(x, y, bit as u32);
            }
        }
        return Ok(pix_mut.into());
    }

    let (channels, bytes_per_sample) = (channels as usize, bytes_per_sample as usize);
    let scale = |v: u32| -> u8 {
        if maxval == 255 {
            v as u8
        } else {
            ((v.min(maxval) * 255 + maxval / 2) / maxval) as u8
        }
    };

    for (y, row) in (0..height).zip(rows) {
        for x in 0..width as usize {
            let sample = |c: usize| -> u8 {
                let i = (x * channels + c) * bytes_per_sample;
                let v = if bytes_per_sample == 2 {
                    (u32::from(row[i]) << 8) | u32::from(row[i + 1])
                } else {
                    u32::from(row[i])
                };
                scale(v)
            };
            let val = if channels == 1 {
                sample(0) as u32
            } else {
                color::compose_rgb(sample(0), sample(1), sample(2))
            };
            pix_mut.set_pixel_unchecked(x as u32, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Read one decimal header field, skipping whitespace and `#` comments.
///
/// Consumes exactly one whitespace byte after the digits, which is the
/// separator before raster data.
fn read_header_value<R: BufRead>(reader: &mut R) -> IoResult<u32> {
    let mut byte = [0u8; 1];
    loop {
        reader.read_exact(&mut byte)?;
        match byte[0] {
            b'#' => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment)?;
            }
            b if b.is_ascii_whitespace() => {}
            b if b.is_ascii_digit() => break,
            b => {
                return Err(IoError::InvalidData(format!(
                    "unexpected byte {:#04x} in PNM header",
                    b
                )));
            }
        }
    }

    let mut value = u32::from(byte[0] - b'0');
    loop {
        reader.read_exact(&mut byte)?;
        if !byte[0].is_ascii_digit() {
            if !byte[0].is_ascii_whitespace() {
                return Err(IoError::InvalidData("malformed PNM header".to_string()));
            }
            return Ok(value);
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(byte[0] - b'0')))
            .ok_or_else(|| IoError::InvalidData("PNM header value overflow".to_string()))?;
    }
}
