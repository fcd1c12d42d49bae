//! textseg-test - Regression test framework for textseg
//!
//! Modeled on the regression style used across the workspace: each
//! `*_reg.rs` test creates a [`RegParams`], records numbered comparisons
//! and asserts on [`RegParams::cleanup`]. Failures are collected rather
//! than panicking so one run reports every mismatch.
//!
//! Test pages are generated by the [`synth`] builders instead of being
//! checked in.
//!
//! # Usage
//!
//! ```ignore
//! use textseg_test::RegParams;
//!
//! let mut rp = RegParams::new("pageseg");
//! rp.compare_values(1.0, regions.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use std::fs;
use std::path::{Path, PathBuf};
use textseg_core::Pix;

/// Install a `tracing` subscriber for tests.
///
/// Honors `RUST_LOG`. Safe to call from every test: only the first call
/// installs anything.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Get the path to the workspace root
fn workspace_root() -> PathBuf {
    // textseg-test is at crates/textseg-test
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> PathBuf {
    workspace_root().join("target/regout")
}

/// Write `data` to `<regout>/<name>` and return the path.
///
/// Used by tests that need a real file on disk, e.g. to exercise path
/// based decoding.
pub fn write_regout(name: &str, data: &[u8]) -> TestResult<PathBuf> {
    let dir = regout_dir();
    fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;
    let path = dir.join(name);
    fs::write(&path, data)?;
    Ok(path)
}

/// Load an image from disk through `textseg-io`.
pub fn load_test_image<P: AsRef<Path>>(path: P) -> TestResult<Pix> {
    let path = path.as_ref();
    textseg_io::read_image(path).map_err(|e| TestError::ImageLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
