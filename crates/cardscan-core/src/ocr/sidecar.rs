//! Recognizer over dumps written by an external OCR engine.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::OcrError;
use crate::models::config::RecognitionConfig;
use crate::models::RawOcrOutput;

use super::TextRecognizer;

/// Reads recognition results stored next to an image.
///
/// For `card.png` it looks for `card.png.<suffix>` holding a JSON
/// [`RawOcrOutput`], then for a plain text `card.txt` scored with the
/// default confidence.
#[derive(Debug, Clone)]
pub struct SidecarRecognizer {
    suffix: String,
    default_confidence: f32,
}

impl SidecarRecognizer {
    /// Create a recognizer with the default `ocr.json` suffix.
    pub fn new() -> Self {
        Self::from_config(&RecognitionConfig::default())
    }

    pub fn from_config(config: &RecognitionConfig) -> Self {
        Self {
            suffix: config.sidecar_suffix.trim_start_matches('.').to_string(),
            default_confidence: config.default_confidence,
        }
    }

    /// Set the confidence used for plain text dumps.
    pub fn with_default_confidence(mut self, confidence: f32) -> Self {
        self.default_confidence = confidence;
        self
    }

    /// Path of the JSON dump for an image.
    pub fn json_path(&self, image: &Path) -> PathBuf {
        let mut name = image.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(&self.suffix);
        image.with_file_name(name)
    }

    /// Path of the plain text dump for an image.
    pub fn text_path(&self, image: &Path) -> PathBuf {
        image.with_extension("txt")
    }
}

impl Default for SidecarRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for SidecarRecognizer {
    fn recognize(&mut self, image: &Path) -> Result<RawOcrOutput, OcrError> {
        let json_path = self.json_path(image);
        if json_path.is_file() {
            debug!("Reading recognition dump {}", json_path.display());
            let content = fs::read_to_string(&json_path)
                .map_err(|e| OcrError::Recognition(format!("{}: {}", json_path.display(), e)))?;
            return serde_json::from_str(&content)
                .map_err(|e| OcrError::Recognition(format!("{}: {}", json_path.display(), e)));
        }

        let text_path = self.text_path(image);
        if text_path.is_file() {
            debug!("Reading text dump {}", text_path.display());
            let text = fs::read_to_string(&text_path)
                .map_err(|e| OcrError::Recognition(format!("{}: {}", text_path.display(), e)))?;
            return Ok(RawOcrOutput::new(text, self.default_confidence));
        }

        Err(OcrError::SidecarNotFound(image.display().to_string()))
    }

    fn wants_preprocessing(&self) -> bool {
        false
    }
}
