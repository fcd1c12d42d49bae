//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use textseg_core::ImageFormat;

/// Magic numbers for image format detection
mod magic {
    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// Binary PNM formats
    pub const PBM_BINARY: &[u8] = b"P4";
    pub const PGM_BINARY: &[u8] = b"P5";
    pub const PPM_BINARY: &[u8] = b"P6";

    /// Formats recognized only to give a precise error
    pub const GIF: &[u8] = b"GIF8";
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 12];
    let bytes_read = file.read(&mut header)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from the leading bytes of an encoded image.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] if fewer than two bytes are given and
/// [`IoError::UnsupportedFormat`] if the signature is not a supported one.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::BMP) {
        return Ok(ImageFormat::Bmp);
    }
    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }
    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }

    let first_two = &data[..2];
    if first_two == magic::PBM_BINARY
        || first_two == magic::PGM_BINARY
        || first_two == magic::PPM_BINARY
    {
        return Ok(ImageFormat::Pnm);
    }

    let name = if data.starts_with(magic::GIF) {
        "GIF"
    } else if data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE) {
        "TIFF"
    } else if first_two == b"P1" || first_two == b"P2" || first_two == b"P3" {
        "ASCII PNM"
    } else {
        "unknown image format"
    };
    Err(IoError::UnsupportedFormat(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_bmp() {
        let data = b"BM\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        assert_eq!(detect_format_from_bytes(data).unwrap(), ImageFormat::Bmp);
    }

    #[test]
    fn test_detect_png() {
        let data = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_detect_jpeg() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_detect_pnm() {
        assert_eq!(
            detect_format_from_bytes(b"P5\n100 100\n255\n").unwrap(),
            ImageFormat::Pnm
        );
        assert_eq!(
            detect_format_from_bytes(b"P4\n8 1\n\x00").unwrap(),
            ImageFormat::Pnm
        );
    }

    #[test]
    fn test_detect_unsupported() {
        assert!(matches!(
            detect_format_from_bytes(b"GIF89a\x00\x00"),
            Err(IoError::UnsupportedFormat(name)) if name == "GIF"
        ));
        assert!(matches!(
            detect_format_from_bytes(b"UNKNOWN_FORMAT"),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format_from_bytes(b"B"),
            Err(IoError::InvalidData(_))
        ));
    }
}
