//! Text recognizer contract
//!
//! The pipeline never recognizes text itself. It hands each prepared crop
//! to a [`TextRecognizer`] supplied by the caller, typically a wrapper
//! around an external OCR engine. Engine settings travel in a
//! [`RecognizerConfig`] given to the implementation when it is built, not
//! in process-wide state.
//!
//! # Example
//!
//! ```
//! use textseg_core::Pix;
//! use textseg_recog::{RecognizeError, RecognizeMode, TextRecognizer};
//!
//! struct Fixed(&'static str);
//!
//! impl TextRecognizer for Fixed {
//!     fn recognize(&self, _image: &Pix, _mode: RecognizeMode) -> Result<String, RecognizeError> {
//!         Ok(self.0.to_string())
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use textseg_core::Pix;
use thiserror::Error;

/// How the engine should interpret the crop it is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizeMode {
    /// A uniform block of text, possibly several lines
    #[default]
    TextBlock,
    /// Exactly one line of text
    SingleLine,
}

impl RecognizeMode {
    /// Tesseract-style page segmentation mode number.
    pub fn page_seg_mode(self) -> u32 {
        match self {
            RecognizeMode::TextBlock => 6,
            RecognizeMode::SingleLine => 7,
        }
    }
}

/// Errors a recognizer can report for one crop
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// The engine could not be started or reached
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),

    /// The engine ran but did not produce text
    #[error("recognition failed: {0}")]
    Failed(String),

    /// The crop was rejected by the engine
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Recognizes the text in one binarized crop.
///
/// Input is an 8 bpp image, black text (0) on white (255). The returned
/// string may carry leading or trailing whitespace; the pipeline trims it.
///
/// Implementations must be shareable across threads: the pipeline may
/// call `recognize` concurrently for different regions.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &Pix, mode: RecognizeMode) -> Result<String, RecognizeError>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for &T {
    fn recognize(&self, image: &Pix, mode: RecognizeMode) -> Result<String, RecognizeError> {
        (**self).recognize(image, mode)
    }
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for std::sync::Arc<T> {
    fn recognize(&self, image: &Pix, mode: RecognizeMode) -> Result<String, RecognizeError> {
        (**self).recognize(image, mode)
    }
}

/// Engine settings for a recognizer implementation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Path to the engine executable; `None` means look it up on `PATH`
    pub engine_path: Option<PathBuf>,
    /// Recognition language code
    pub language: String,
    /// OCR engine mode passed as `--oem`
    pub engine_mode: u32,
    /// Extra arguments appended verbatim
    pub extra_args: Vec<String>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            engine_path: None,
            language: "eng".to_string(),
            engine_mode: 3,
            extra_args: Vec::new(),
        }
    }
}

impl RecognizerConfig {
    pub fn with_engine_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.engine_path = Some(path.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_engine_mode(mut self, mode: u32) -> Self {
        self.engine_mode = mode;
        self
    }

    pub fn with_extra_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Command-line arguments for a Tesseract-compatible engine.
    pub fn engine_args(&self, mode: RecognizeMode) -> Vec<String> {
        let mut args = vec![
            "-l".to_string(),
            self.language.clone(),
            "--oem".to_string(),
            self.engine_mode.to_string(),
            "--psm".to_string(),
            mode.page_seg_mode().to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_args_default() {
        let args = RecognizerConfig::default().engine_args(RecognizeMode::TextBlock);
        assert_eq!(args, ["-l", "eng", "--oem", "3", "--psm", "6"]);
    }

    #[test]
    fn test_engine_args_custom() {
        let cfg = RecognizerConfig::default()
            .with_engine_path("/opt/ocr/bin/tesseract")
            .with_language("deu")
            .with_extra_arg("-c")
            .with_extra_arg("preserve_interword_spaces=1");
        assert_eq!(cfg.engine_path.as_deref(), Some(std::path::Path::new("/opt/ocr/bin/tesseract")));
        let args = cfg.engine_args(RecognizeMode::SingleLine);
        assert_eq!(args[1], "deu");
        assert_eq!(args[5], "7");
        assert_eq!(args.last().map(String::as_str), Some("preserve_interword_spaces=1"));
    }

    #[test]
    fn test_config_from_json_defaults() {
        let cfg: RecognizerConfig = serde_json::from_str(r#"{"language": "fra"}"#).unwrap();
        assert_eq!(cfg.language, "fra");
        assert_eq!(cfg.engine_mode, 3);
        assert!(cfg.engine_path.is_none());
    }
}
