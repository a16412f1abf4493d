//! Contact extraction from business card OCR text.

pub mod confidence;
pub mod normalize;
mod pipeline;
pub mod rules;

pub use confidence::aggregate;
pub use normalize::{normalize, segment_lines, NormalizedText};
pub use pipeline::ExtractionPipeline;

use crate::error::ExtractionError;
use crate::models::{ExtractionResult, RawOcrOutput};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for turning OCR output into a scored contact.
pub trait CardExtractor {
    /// Extract contact fields from one card's OCR output.
    fn extract(&self, output: &RawOcrOutput) -> Result<ExtractionResult>;
}
