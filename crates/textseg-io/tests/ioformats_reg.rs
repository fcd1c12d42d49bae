//! Image decoding regression test
//!
//! Encodes small images in memory (PNG through the `png` crate, PNM by
//! hand), decodes them through the public entry points and checks the
//! pixels that come back.

use textseg_core::{ImageFormat, PixelDepth};
use textseg_io::{IoError, read_image, read_image_mem};
use textseg_test::RegParams;

fn encode_png(width: u32, height: u32, color: png::ColorType, palette: Option<&[u8]>, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(p) = palette {
            encoder.set_palette(p.to_vec());
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    buf
}

#[test]
fn ioformats_reg_png() {
    let mut rp = RegParams::new("ioformats_png");

    // --- 8 bpp grayscale ---
    let gray = encode_png(3, 2, png::ColorType::Grayscale, None, &[0, 128, 255, 10, 20, 30]);
    let pix = read_image_mem(&gray).unwrap();
    rp.compare_values(8.0, pix.depth().bits() as f64, 0.0);
    rp.compare_values(128.0, pix.get_pixel(1, 0).unwrap() as f64, 0.0);
    rp.compare_values(30.0, pix.get_pixel(2, 1).unwrap() as f64, 0.0);
    assert_eq!(pix.informat(), ImageFormat::Png);

    // --- RGB ---
    let rgb = encode_png(2, 1, png::ColorType::Rgb, None, &[255, 0, 0, 1, 2, 3]);
    let pix = read_image_mem(&rgb).unwrap();
    assert_eq!(pix.depth(), PixelDepth::Bit32);
    assert_eq!(pix.get_rgb(0, 0), Some((255, 0, 0)));
    assert_eq!(pix.get_rgb(1, 0), Some((1, 2, 3)));

    // --- palette is expanded to RGB ---
    let palette = [0, 0, 0, 250, 240, 230];
    let indexed = encode_png(2, 1, png::ColorType::Indexed, Some(&palette), &[1, 0]);
    let pix = read_image_mem(&indexed).unwrap();
    assert_eq!(pix.depth(), PixelDepth::Bit32);
    assert_eq!(pix.get_rgb(0, 0), Some((250, 240, 230)));
    assert_eq!(pix.get_rgb(1, 0), Some((0, 0, 0)));

    assert!(rp.cleanup());
}

#[test]
fn ioformats_reg_pnm() {
    let mut rp = RegParams::new("ioformats_pnm");

    let mut ppm = b"P6\n# comment\n2 1\n255\n".to_vec();
    ppm.extend_from_slice(&[10, 20, 30, 200, 100, 0]);
    let pix = read_image_mem(&ppm).unwrap();
    rp.compare_values(32.0, pix.depth().bits() as f64, 0.0);
    assert_eq!(pix.get_rgb(1, 0), Some((200, 100, 0)));
    assert_eq!(pix.informat(), ImageFormat::Pnm);

    let mut pgm = b"P5 3 1 255 ".to_vec();
    pgm.extend_from_slice(&[1, 2, 3]);
    let pix = read_image_mem(&pgm).unwrap();
    rp.compare_values(8.0, pix.depth().bits() as f64, 0.0);
    rp.compare_values(3.0, pix.get_pixel(2, 0).unwrap() as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn ioformats_reg_file() {
    let mut rp = RegParams::new("ioformats_file");

    let gray = encode_png(4, 4, png::ColorType::Grayscale, None, &[77; 16]);
    let path = textseg_test::write_regout("ioformats_file.png", &gray).unwrap();
    let pix = textseg_test::load_test_image(&path).unwrap();
    rp.compare_values(4.0, pix.width() as f64, 0.0);
    rp.compare_values(77.0, pix.get_pixel(3, 3).unwrap() as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn ioformats_reg_errors() {
    let missing = read_image("/nonexistent/dir/page.png");
    match missing {
        Err(IoError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected NotFound, got {:?}", other.map(|p| p.width())),
    }

    assert!(matches!(
        read_image_mem(b"not an image at all"),
        Err(IoError::UnsupportedFormat(_))
    ));

    let mut corrupt = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    corrupt.extend_from_slice(b"garbage chunk data");
    assert!(matches!(
        read_image_mem(&corrupt),
        Err(IoError::DecodeError(_))
    ));

    // A header that claims zero width never reaches the pipeline
    assert!(matches!(
        read_image_mem(b"P5 0 4 255 "),
        Err(IoError::Core(textseg_core::Error::InvalidDimension { .. }))
    ));

    // Header dimensions far beyond the bytes present are rejected before allocating
    assert!(matches!(
        read_image_mem(b"P6\n4000000000 4000000000\n255\n"),
        Err(IoError::InvalidData(_))
    ));
    assert!(matches!(
        read_image_mem(b"P5\n3 3\n255\n\x00\x00\x00\x00"),
        Err(IoError::InvalidData(_))
    ));

    let mut huge_bmp = b"BM".to_vec();
    huge_bmp.extend_from_slice(&[0; 8]);
    huge_bmp.extend_from_slice(&54u32.to_le_bytes());
    huge_bmp.extend_from_slice(&40u32.to_le_bytes());
    huge_bmp.extend_from_slice(&100_000i32.to_le_bytes());
    huge_bmp.extend_from_slice(&100_000i32.to_le_bytes());
    huge_bmp.extend_from_slice(&1u16.to_le_bytes());
    huge_bmp.extend_from_slice(&24u16.to_le_bytes());
    huge_bmp.extend_from_slice(&[0; 24]);
    assert!(matches!(
        read_image_mem(&huge_bmp),
        Err(IoError::InvalidData(_))
    ));
}
