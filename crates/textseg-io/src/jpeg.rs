//! JPEG image format support
//!
//! Reads baseline and progressive JPEG through the `jpeg-decoder` crate.
//! Grayscale decodes to 8 bpp; RGB and CMYK decode to 32 bpp RGB.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;
use textseg_core::{ImageFormat, Pix, PixMut, PixelDepth, color};

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let (depth, stride) = match info.pixel_format {
        PixelFormat::L8 => (PixelDepth::Bit8, 1),
        PixelFormat::L16 => (PixelDepth::Bit8, 2),
        PixelFormat::RGB24 => (PixelDepth::Bit32, 3),
        PixelFormat::CMYK32 => (PixelDepth::Bit32, 4),
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG pixel format {:?}",
                other
            )));
        }
    };

    let expected = width as usize * height as usize * stride;
    if pixels.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} < {}",
            pixels.len(),
            expected
        )));
    }

    let mut pix_mut = PixMut::new(width, height, depth)?;
    pix_mut.set_informat(ImageFormat::Jpeg);

    let npix = width as usize * height as usize;
    for (i, px) in pixels.chunks_exact(stride).take(npix).enumerate() {
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        let val = match stride {
            // L16 samples are big endian; keep the high byte
            1 | 2 => px[0] as u32,
            3 => color::compose_rgb(px[0], px[1], px[2]),
            _ => {
                let k = 255 - px[3] as u32;
                let ch = |c: u8| ((255 - c as u32) * k / 255) as u8;
                color::compose_rgb(ch(px[0]), ch(px[1]), ch(px[2]))
            }
        };
        pix_mut.set_pixel_unchecked(x, y, val);
    }

    Ok(pix_mut.into())
}
