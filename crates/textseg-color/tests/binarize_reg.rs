//! Binarization regression test
//!
//! Adaptive thresholding of a solid ink block keeps a band along the block
//! edge and drops its flat interior, which is what the later closing step
//! relies on to rebuild text blocks. Otsu is checked on the same page.

use textseg_color::{
    AdaptiveMethod, AdaptiveThresholdOptions, adaptive_threshold, compute_otsu_threshold,
    threshold_otsu, threshold_to_binary,
};
use textseg_core::{Box, PixelDepth};
use textseg_test::{RegParams, synth};

#[test]
fn binarize_reg() {
    let mut rp = RegParams::new("binarize");

    let block = Box::new_unchecked(100, 60, 200, 80);
    let pixs = synth::page_with_blocks(400, 200, &[block]).expect("page");
    let w = pixs.width();
    let h = pixs.height();

    // --- Fixed threshold ---
    let bin128 = threshold_to_binary(&pixs, 128).expect("threshold 128");
    rp.compare_values(w as f64, bin128.width() as f64, 0.0);
    rp.compare_values(h as f64, bin128.height() as f64, 0.0);
    rp.compare_values(1.0, bin128.depth().bits() as f64, 0.0);
    rp.compare_values(
        block.area() as f64,
        bin128.count_pixels().unwrap() as f64,
        0.0,
    );

    // --- Otsu ---
    let otsu_thresh = compute_otsu_threshold(&pixs).expect("compute_otsu");
    rp.compare_values(0.0, otsu_thresh as f64, 0.0);
    let otsu_bin = threshold_otsu(&pixs).expect("threshold_otsu");
    rp.compare_pix(&bin128, &otsu_bin);

    // --- Adaptive, default Gaussian window ---
    let options = AdaptiveThresholdOptions::default();
    let adaptive = adaptive_threshold(&pixs, &options).expect("adaptive_threshold");
    rp.compare_values(w as f64, adaptive.width() as f64, 0.0);
    rp.compare_values(h as f64, adaptive.height() as f64, 0.0);
    rp.compare_values(1.0, adaptive.depth().bits() as f64, 0.0);

    // paper is never foreground
    rp.compare_values(0.0, adaptive.get_pixel(20, 20).unwrap() as f64, 0.0);
    rp.compare_values(0.0, adaptive.get_pixel(99, 100).unwrap() as f64, 0.0);
    // ink along the edge is foreground
    rp.compare_values(1.0, adaptive.get_pixel(100, 100).unwrap() as f64, 0.0);
    rp.compare_values(1.0, adaptive.get_pixel(104, 100).unwrap() as f64, 0.0);
    rp.compare_values(1.0, adaptive.get_pixel(200, 139).unwrap() as f64, 0.0);
    // flat interior is not
    rp.compare_values(0.0, adaptive.get_pixel(200, 100).unwrap() as f64, 0.0);

    // The band along the left edge is about 9 px deep.
    let depth = (100..200)
        .take_while(|&x| adaptive.get_pixel(x, 100) == Some(1))
        .count();
    rp.compare_values(9.0, depth as f64, 2.0);

    // --- Adaptive, box mean ---
    let mean_opts = options.clone().with_method(AdaptiveMethod::Mean);
    let adaptive_mean = adaptive_threshold(&pixs, &mean_opts).expect("adaptive mean");
    rp.compare_values(1.0, adaptive_mean.get_pixel(100, 100).unwrap() as f64, 0.0);
    rp.compare_values(0.0, adaptive_mean.get_pixel(200, 100).unwrap() as f64, 0.0);
    rp.compare_values(0.0, adaptive_mean.get_pixel(20, 20).unwrap() as f64, 0.0);

    // deterministic
    let again = adaptive_threshold(&pixs, &options).expect("adaptive again");
    rp.compare_pix(&adaptive, &again);

    assert!(rp.cleanup(), "binarize regression test failed");
}

#[test]
fn binarize_blank_page_reg() {
    let mut rp = RegParams::new("binarize_blank");

    let blank = synth::blank_page(120, 80, PixelDepth::Bit8).expect("blank");
    let adaptive =
        adaptive_threshold(&blank, &AdaptiveThresholdOptions::default()).expect("adaptive");
    rp.compare_values(0.0, adaptive.count_pixels().unwrap() as f64, 0.0);
    let otsu = threshold_otsu(&blank).expect("otsu");
    rp.compare_values(0.0, otsu.count_pixels().unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "binarize blank page regression test failed");
}

#[test]
fn binarize_options_serde_reg() {
    let mut rp = RegParams::new("binarize_options");

    let parsed: AdaptiveThresholdOptions =
        serde_json::from_str(r#"{"window_size": 25, "method": "mean"}"#).expect("parse");
    rp.compare_values(25.0, parsed.window_size as f64, 0.0);
    rp.compare_values(15.0, parsed.c as f64, 0.0);
    rp.compare_values(1.0, (parsed.method == AdaptiveMethod::Mean) as i32 as f64, 0.0);

    let json = serde_json::to_string(&AdaptiveThresholdOptions::default()).expect("write");
    let back: AdaptiveThresholdOptions = serde_json::from_str(&json).expect("reparse");
    rp.compare_values(1.0, (back == AdaptiveThresholdOptions::default()) as i32 as f64, 0.0);

    assert!(rp.cleanup(), "binarize options regression test failed");
}
