//! PNG image format support
//!
//! Decoding is left to the `png` crate with `EXPAND` set, so palettes
//! arrive as RGB(A) and sub-byte gray as 8 bpp. 16-bit samples keep their
//! most significant byte.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Transformations, Unit};
use std::io::{BufRead, Seek};
use textseg_core::{ImageFormat, Pix, PixMut, PixelDepth, color};

/// Read a PNG image.
///
/// Gray images decode to 8 bpp, everything else to 32 bpp.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let resolution = reader.info().pixel_dims.and_then(|dims| match dims.unit {
        Unit::Meter => Some((
            (dims.xppu as f64 * 0.0254 + 0.5) as i32,
            (dims.yppu as f64 * 0.0254 + 0.5) as i32,
        )),
        Unit::Unspecified => None,
    });

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let color_type = output_info.color_type;
    let bytes_per_sample = match output_info.bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unexpanded PNG bit depth: {:?}",
                other
            )));
        }
    };
    let (depth, spp, channels) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1, 1),
        ColorType::GrayscaleAlpha => (PixelDepth::Bit32, 4, 2),
        ColorType::Rgb => (PixelDepth::Bit32, 3, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "unexpanded PNG palette".to_string(),
            ));
        }
    };

    let mut pix_mut = PixMut::new(width, height, depth)?;
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Png);
    if let Some((xres, yres)) = resolution {
        pix_mut.set_resolution(xres, yres);
    }

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let stride = channels * bytes_per_sample;

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..][..bytes_per_row];
        for x in 0..width {
            let px = &row[x as usize * stride..][..stride];
            // Most significant byte of sample `i`.
            let s = |i: usize| px[i * bytes_per_sample];
            let val = match color_type {
                ColorType::Grayscale => s(0) as u32,
                ColorType::GrayscaleAlpha => color::compose_rgba(s(0), s(0), s(0), s(1)),
                ColorType::Rgb => color::compose_rgb(s(0), s(1), s(2)),
                _ => color::compose_rgba(s(0), s(1), s(2), s(3)),
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}
