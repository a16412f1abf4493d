//! Scoped acquisition of a recognition engine.

use std::path::Path;

use tracing::warn;

use crate::error::OcrError;
use crate::models::RawOcrOutput;

use super::TextRecognizer;

/// Holds an engine for the duration of a scan and releases it on every
/// exit path.
///
/// Prefer [`RecognitionSession::finish`], which reports a failed release;
/// a session that is simply dropped releases the engine and logs failures.
pub struct RecognitionSession<R: TextRecognizer> {
    engine: Option<R>,
}

impl<R: TextRecognizer> RecognitionSession<R> {
    /// Take ownership of an initialized engine.
    pub fn acquire(engine: R) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    pub fn wants_preprocessing(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.wants_preprocessing())
    }

    /// Recognize one image with the held engine.
    pub fn recognize(&mut self, image: &Path) -> Result<RawOcrOutput, OcrError> {
        match self.engine.as_mut() {
            Some(engine) => engine.recognize(image),
            None => Err(OcrError::Recognition("engine already released".to_string())),
        }
    }

    /// Release the engine.
    pub fn finish(mut self) -> Result<(), OcrError> {
        match self.engine.take() {
            Some(mut engine) => engine.terminate(),
            None => Ok(()),
        }
    }
}

impl<R: TextRecognizer> Drop for RecognitionSession<R> {
    fn drop(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            if let Err(e) = engine.terminate() {
                warn!("Failed to release OCR engine: {}", e);
            }
        }
    }
}
