//! WASM bindings for business card contact extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js,
//! where recognition typically runs in JavaScript and only the text reaches
//! the extractor.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use cardscan_core::card::segment_lines;
use cardscan_core::{Contact, ExtractionPipeline, ExtractionResult, FieldScores};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Serialize)]
struct ContactOutput {
    contact: Contact,
    scores: FieldScores,
}

fn run(text: &str, ocr_confidence: f32) -> Result<ExtractionResult, JsValue> {
    ExtractionPipeline::new()
        .run(text, ocr_confidence)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn contact_output(result: &ExtractionResult, min_confidence: f32) -> Result<JsValue, JsValue> {
    let output = ContactOutput {
        contact: result.contact(min_confidence),
        scores: result.field_scores(),
    };
    serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract a contact from OCR text.
///
/// Returns `{ contact, scores }`. `ocr_confidence` is the engine's score on
/// a 0 - 100 scale.
#[wasm_bindgen]
pub fn extract_contact(text: &str, ocr_confidence: f32) -> Result<JsValue, JsValue> {
    contact_output(&run(text, ocr_confidence)?, 0.0)
}

/// Repair common OCR spacing artifacts.
#[wasm_bindgen]
pub fn normalize_text(text: &str) -> String {
    cardscan_core::normalize(text)
}

/// Split normalized text into trimmed, non-empty lines.
#[wasm_bindgen]
pub fn card_lines(text: &str) -> js_sys::Array {
    let normalized = cardscan_core::normalize(text);
    segment_lines(&normalized)
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}

/// Contact extractor class for browser use.
#[wasm_bindgen]
pub struct CardExtractor {
    pipeline: ExtractionPipeline,
    min_confidence: f32,
}

#[wasm_bindgen]
impl CardExtractor {
    /// Create a new contact extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            pipeline: ExtractionPipeline::new(),
            min_confidence: 0.0,
        }
    }

    /// Drop fields scored below this confidence (0 - 1) from contacts.
    #[wasm_bindgen]
    pub fn set_min_confidence(&mut self, min_confidence: f32) {
        self.min_confidence = min_confidence.clamp(0.0, 1.0);
    }

    #[wasm_bindgen(getter)]
    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Full extraction result with every field's value and confidence.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, ocr_confidence: f32) -> Result<JsValue, JsValue> {
        let result = self
            .pipeline
            .run(text, ocr_confidence)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Contact with fields below the minimum confidence dropped.
    #[wasm_bindgen]
    pub fn extract_contact(&self, text: &str, ocr_confidence: f32) -> Result<JsValue, JsValue> {
        let result = self
            .pipeline
            .run(text, ocr_confidence)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        contact_output(&result, self.min_confidence)
    }
}

impl Default for CardExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Text recognized by a browser-side OCR engine, line by line.
#[wasm_bindgen]
pub struct RecognizedText {
    lines: Vec<RecognizedLine>,
}

struct RecognizedLine {
    text: String,
    confidence: f32,
}

#[wasm_bindgen]
impl RecognizedText {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one recognized line with its engine confidence (0 - 100).
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str, confidence: f32) {
        self.lines.push(RecognizedLine {
            text: text.to_string(),
            confidence,
        });
    }

    /// Lines joined with newlines.
    #[wasm_bindgen]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Mean line confidence, weighted by line length.
    #[wasm_bindgen]
    pub fn confidence(&self) -> f32 {
        let (weighted, chars) = self
            .lines
            .iter()
            .filter(|l| l.confidence.is_finite())
            .fold((0.0f64, 0usize), |(sum, n), l| {
                let len = l.text.chars().count();
                (sum + l.confidence.clamp(0.0, 100.0) as f64 * len as f64, n + len)
            });

        if chars == 0 {
            0.0
        } else {
            (weighted / chars as f64) as f32
        }
    }

    /// Extract the contact from the recognized lines.
    #[wasm_bindgen]
    pub fn extract_contact(&self) -> Result<JsValue, JsValue> {
        extract_contact(&self.text(), self.confidence())
    }
}

impl Default for RecognizedText {
    fn default() -> Self {
        Self::new()
    }
}
