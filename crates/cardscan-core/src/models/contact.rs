//! Contact data models produced by the extraction pipeline.

use serde::{Deserialize, Serialize};

/// A single extracted value with the extractor's own confidence.
///
/// A score either holds a trimmed, non-empty value with a confidence in
/// `(0.0, 1.0]`, or no value with confidence `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldScore<T> {
    value: Option<T>,
    confidence: f32,
}

impl<T> FieldScore<T> {
    /// An absent field.
    pub fn none() -> Self {
        Self {
            value: None,
            confidence: 0.0,
        }
    }

    /// Extracted value, if any.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Confidence score (0.0 - 1.0).
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl FieldScore<String> {
    /// Build a score from a candidate string.
    ///
    /// The candidate is trimmed; an empty candidate or a non-positive
    /// confidence yields an absent field.
    pub fn found(value: impl AsRef<str>, confidence: f32) -> Self {
        let value = value.as_ref().trim();
        if value.is_empty() || !(confidence > 0.0) {
            return Self::none();
        }

        Self {
            value: Some(value.to_string()),
            confidence: confidence.min(1.0),
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<T> Default for FieldScore<T> {
    fn default() -> Self {
        Self::none()
    }
}

/// Raw output of the OCR collaborator for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOcrOutput {
    /// Recognized text.
    pub text: String,

    /// Engine confidence (0 - 100).
    #[serde(default)]
    pub confidence: f32,
}

impl RawOcrOutput {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Result of running the extraction pipeline on one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub full_name: FieldScore<String>,
    pub company: FieldScore<String>,
    pub email: FieldScore<String>,
    pub phone: FieldScore<String>,
    pub position: FieldScore<String>,
    pub address: FieldScore<String>,
    pub website: FieldScore<String>,

    /// Overall extraction confidence (0 - 100).
    pub confidence: u8,

    /// Confidence reported by the OCR engine (0 - 100).
    pub ocr_confidence: f32,

    /// Normalized OCR text the fields were extracted from.
    pub raw_text: String,
}

impl ExtractionResult {
    /// All seven fields with their names, in output order.
    pub fn fields(&self) -> [(&'static str, &FieldScore<String>); 7] {
        [
            ("full_name", &self.full_name),
            ("company", &self.company),
            ("email", &self.email),
            ("phone", &self.phone),
            ("position", &self.position),
            ("address", &self.address),
            ("website", &self.website),
        ]
    }

    /// Number of fields that produced a value.
    pub fn found_count(&self) -> usize {
        self.fields().iter().filter(|(_, f)| f.is_present()).count()
    }

    /// Flat per-field confidence map stored alongside a detection.
    pub fn field_scores(&self) -> FieldScores {
        FieldScores {
            full_name: self.full_name.confidence(),
            company: self.company.confidence(),
            position: self.position.confidence(),
            address: self.address.confidence(),
            email: self.email.confidence(),
            phone: self.phone.confidence(),
            website: self.website.confidence(),
            ocr: self.ocr_confidence.clamp(0.0, 100.0).round() as u8,
        }
    }

    /// Flatten into a contact, dropping fields scored below `min_confidence`.
    pub fn contact(&self, min_confidence: f32) -> Contact {
        let keep = |field: &FieldScore<String>| {
            field
                .value()
                .filter(|_| field.confidence() >= min_confidence)
                .cloned()
        };

        Contact {
            full_name: keep(&self.full_name),
            company: keep(&self.company),
            email: keep(&self.email),
            phone: keep(&self.phone),
            position: keep(&self.position),
            address: keep(&self.address),
            website: keep(&self.website),
            confidence: self.confidence,
            raw_text: self.raw_text.clone(),
        }
    }
}

/// Per-field confidences plus the rounded OCR engine confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldScores {
    pub full_name: f32,
    pub company: f32,
    pub position: f32,
    pub address: f32,
    pub email: f32,
    pub phone: f32,
    pub website: f32,
    pub ocr: u8,
}

/// Contact card as handed to storage or display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Overall extraction confidence (0 - 100).
    pub confidence: u8,

    /// Normalized OCR text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_text: String,
}
