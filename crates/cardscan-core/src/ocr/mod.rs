//! Boundary with the external OCR engine.
//!
//! Recognition itself is not done here. This module defines the seam an
//! engine plugs into, a session guard that always releases the engine, a
//! recognizer over dumps an engine left next to an image, image preparation,
//! and the scanner tying them to the extraction pipeline.

#[cfg(feature = "native")]
mod preprocessing;
mod scanner;
mod session;
mod sidecar;

#[cfg(feature = "native")]
pub use preprocessing::{prepared_path, ImagePreprocessor};
pub use scanner::CardScanner;
pub use session::RecognitionSession;
pub use sidecar::SidecarRecognizer;

use std::path::{Path, PathBuf};

use crate::error::OcrError;
use crate::models::RawOcrOutput;

/// A text recognition engine.
pub trait TextRecognizer {
    /// Recognize the text on one image.
    fn recognize(&mut self, image: &Path) -> Result<RawOcrOutput, OcrError>;

    /// Release engine resources. Called exactly once per session.
    fn terminate(&mut self) -> Result<(), OcrError> {
        Ok(())
    }

    /// Whether images should be prepared before recognition.
    fn wants_preprocessing(&self) -> bool {
        true
    }
}

/// Prepares an image for recognition, returning the path of the prepared copy.
pub trait ImagePreparer {
    fn prepare(&self, image: &Path) -> Result<PathBuf, OcrError>;
}
