//! textseg-io - Image decoding
//!
//! Reads scanned pages from disk or memory into a [`Pix`]. The format is
//! detected from the leading magic bytes, never from the file extension.
//!
//! | Format | Feature      | Decoded depth             |
//! |--------|--------------|---------------------------|
//! | PNG    | `png-format` | 8 bpp gray, 32 bpp color  |
//! | JPEG   | `jpeg`       | 8 bpp gray, 32 bpp RGB    |
//! | PNM    | `pnm`        | 1 / 8 / 32 bpp            |
//! | BMP    | `bmp`        | 8 bpp gray, 32 bpp color  |

pub mod error;
pub mod format;

#[cfg(feature = "bmp")]
pub mod bmp;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use textseg_core::ImageFormat;

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::Path;
use textseg_core::Pix;

/// Read an image from a file path.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened (e.g.
/// `NotFound`), [`IoError::UnsupportedFormat`] for unrecognized data and
/// a decode error for corrupt data.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    let format = detect_format_from_bytes(reader.fill_buf()?)?;
    read_image_format(reader, format)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Decode an image whose format is already known.
pub fn read_image_format<R: BufRead + Seek>(reader: R, format: ImageFormat) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} decoding is not enabled",
            other
        ))),
    }
}

/// Read the raster payload of a `width x height` image whose rows are
/// `row_bytes` long.
///
/// The size claimed by the header is checked against the bytes actually
/// present before any image is allocated, so a corrupt header gives an
/// error instead of a huge allocation.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] if the payload size overflows or the
/// input ends early, and `InvalidDimension` for a zero-sized image.
#[cfg(any(feature = "bmp", feature = "pnm"))]
pub(crate) fn read_raster<R: std::io::Read>(
    reader: &mut R,
    width: u32,
    height: u32,
    row_bytes: u64,
) -> IoResult<Vec<u8>> {
    use std::io::Read;

    if width == 0 || height == 0 {
        return Err(textseg_core::Error::InvalidDimension { width, height }.into());
    }
    let len = row_bytes
        .checked_mul(u64::from(height))
        .filter(|&n| usize::try_from(n).is_ok())
        .ok_or_else(|| {
            IoError::InvalidData(format!("{}x{} raster is too large", width, height))
        })?;

    let mut data = Vec::new();
    reader.by_ref().take(len).read_to_end(&mut data)?;
    if (data.len() as u64) < len {
        return Err(IoError::InvalidData(format!(
            "raster truncated: header claims {} bytes, found {}",
            len,
            data.len()
        )));
    }
    Ok(data)
}
