//! Error types for the cardscan-core library.

use thiserror::Error;

/// Main error type for the cardscan library.
#[derive(Error, Debug)]
pub enum CardscanError {
    /// Contact extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// OCR collaborator error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image processing error.
    #[cfg(feature = "native")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the OCR engine and image preparation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OcrError {
    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image preprocessing failed.
    #[error("preprocessing failed: {0}")]
    Preprocessing(String),

    /// No recognition dump was found next to the image.
    #[error("no recognition sidecar found for {0}")]
    SidecarNotFound(String),

    /// The engine could not be released cleanly.
    #[error("failed to release OCR engine: {0}")]
    Release(String),
}

/// Errors related to contact field extraction.
///
/// Field extractors never fail; a missing field is an empty score. The only
/// error is a caller handing the pipeline something it cannot read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// Input rejected before normalization.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for the cardscan library.
pub type Result<T> = std::result::Result<T, CardscanError>;
