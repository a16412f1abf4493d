//! Core library for business card contact extraction.
//!
//! This crate provides:
//! - OCR text normalization (spacing and glyph repairs)
//! - Rule-based contact field extraction (name, title, company, email,
//!   phone, website, address) with per-field confidence
//! - Overall confidence blending field scores with the OCR engine score
//! - The OCR engine boundary: recognizer trait, scoped sessions, sidecar
//!   dumps and image preprocessing

pub mod card;
pub mod error;
pub mod models;
pub mod ocr;

pub use card::{normalize, CardExtractor, ExtractionPipeline};
pub use error::{CardscanError, ExtractionError, OcrError, Result};
pub use models::{
    CardscanConfig, Contact, ExtractionResult, FieldScore, FieldScores, RawOcrOutput,
};
pub use ocr::{CardScanner, ImagePreparer, RecognitionSession, SidecarRecognizer, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::{prepared_path, ImagePreprocessor};
