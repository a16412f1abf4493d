//! Extraction pipeline: normalize, segment, extract, score.

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::{ExtractionResult, RawOcrOutput};

use super::confidence::aggregate;
use super::normalize::NormalizedText;
use super::rules::{
    AddressExtractor, CompanyExtractor, EmailExtractor, FieldExtractor, JobTitleExtractor,
    LineExtractor, NameExtractor, PhoneExtractor, WebsiteExtractor,
};
use super::{CardExtractor, Result};

/// Stateless contact extraction pipeline.
///
/// Every call is independent: identical input always produces an identical
/// result, so one pipeline can be shared freely across threads.
#[derive(Default)]
pub struct ExtractionPipeline {
    email: EmailExtractor,
    phone: PhoneExtractor,
    website: WebsiteExtractor,
    address: AddressExtractor,
    name: NameExtractor,
    title: JobTitleExtractor,
    company: CompanyExtractor,
}

impl ExtractionPipeline {
    /// Create a new pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the pipeline on recognized text and the engine's confidence (0 - 100).
    pub fn run(&self, raw_text: &str, ocr_confidence: f32) -> Result<ExtractionResult> {
        if !ocr_confidence.is_finite() || !(0.0..=100.0).contains(&ocr_confidence) {
            return Err(ExtractionError::InvalidInput(format!(
                "OCR confidence must be within 0..=100, got {ocr_confidence}"
            )));
        }

        debug!("Extracting contact from {} characters of OCR text", raw_text.len());

        let normalized = NormalizedText::new(raw_text);
        let text = normalized.as_str();
        let lines = normalized.lines();

        let email = self.email.extract(text);
        let phone = self.phone.extract(text);
        let website = self.website.extract(text);
        let address = self.address.extract(&lines);
        let full_name = self.name.extract(&lines);
        let position = self.title.extract(&lines);
        let company = self
            .company
            .extract(&lines, website.as_deref(), email.as_deref());

        let confidence = aggregate(
            [&full_name, &position, &company, &email, &phone, &website, &address],
            ocr_confidence,
        );

        let result = ExtractionResult {
            full_name,
            company,
            email,
            phone,
            position,
            address,
            website,
            confidence,
            ocr_confidence,
            raw_text: normalized.into_string(),
        };

        info!(
            "Extracted {}/7 contact fields with confidence {}",
            result.found_count(),
            result.confidence
        );

        Ok(result)
    }

    /// Run the pipeline on raw bytes, rejecting anything that is not UTF-8.
    pub fn run_bytes(&self, raw: &[u8], ocr_confidence: f32) -> Result<ExtractionResult> {
        let text = std::str::from_utf8(raw).map_err(|e| {
            ExtractionError::InvalidInput(format!("OCR text is not valid UTF-8: {e}"))
        })?;
        self.run(text, ocr_confidence)
    }
}

impl CardExtractor for ExtractionPipeline {
    fn extract(&self, output: &RawOcrOutput) -> Result<ExtractionResult> {
        self.run(&output.text, output.confidence)
    }
}
