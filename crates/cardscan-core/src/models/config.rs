//! Configuration structures for the card scanning pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration for cardscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardscanConfig {
    /// Contact extraction configuration.
    pub extraction: ExtractionConfig,

    /// OCR collaborator configuration.
    pub recognition: RecognitionConfig,

    /// Image preprocessing configuration.
    pub preprocessing: PreprocessingConfig,
}

/// Contact extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum confidence for a field to appear in a presented contact.
    pub min_field_confidence: f32,

    /// Include the normalized OCR text in output.
    pub keep_raw_text: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_field_confidence: 0.0,
            keep_raw_text: true,
        }
    }
}

/// OCR collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// OCR confidence (0 - 100) assumed for plain text inputs.
    pub default_confidence: f32,

    /// Suffix of recognition dumps stored next to images.
    pub sidecar_suffix: String,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            default_confidence: 0.0,
            sidecar_suffix: "ocr.json".to_string(),
        }
    }
}

/// Image preprocessing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Run preprocessing before recognition.
    pub enabled: bool,

    /// Width images are resized to, keeping aspect ratio.
    pub target_width: u32,

    /// Unsharp mask blur radius.
    pub sharpen_sigma: f32,

    /// Unsharp mask threshold.
    pub sharpen_threshold: i32,

    /// Keep the preprocessed image after recognition.
    pub keep_intermediate: bool,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_width: 2000,
            sharpen_sigma: 1.0,
            sharpen_threshold: 1,
            keep_intermediate: false,
        }
    }
}

impl CardscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
