//! Image to contact: preparation, recognition and extraction.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::card::{CardExtractor, ExtractionPipeline};
use crate::error::Result;
use crate::models::{CardscanConfig, ExtractionResult};

use super::{ImagePreparer, RecognitionSession, TextRecognizer};

/// Scans card images with a recognition engine and extracts the contact.
pub struct CardScanner<E: CardExtractor = ExtractionPipeline> {
    extractor: E,
    preparer: Option<Box<dyn ImagePreparer + Send + Sync>>,
    keep_intermediate: bool,
}

impl CardScanner<ExtractionPipeline> {
    /// Scanner with the default pipeline and no preprocessing.
    pub fn new() -> Self {
        Self::with_extractor(ExtractionPipeline::new())
    }

    /// Scanner configured from settings.
    pub fn from_config(config: &CardscanConfig) -> Self {
        let scanner = Self::new().keep_intermediate(config.preprocessing.keep_intermediate);

        #[cfg(feature = "native")]
        if config.preprocessing.enabled {
            return scanner.with_preparer(super::ImagePreprocessor::from_config(
                &config.preprocessing,
            ));
        }

        scanner
    }
}

impl Default for CardScanner<ExtractionPipeline> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CardExtractor> CardScanner<E> {
    pub fn with_extractor(extractor: E) -> Self {
        Self {
            extractor,
            preparer: None,
            keep_intermediate: false,
        }
    }

    /// Prepare images before handing them to engines that want it.
    pub fn with_preparer(mut self, preparer: impl ImagePreparer + Send + Sync + 'static) -> Self {
        self.preparer = Some(Box::new(preparer));
        self
    }

    /// Keep prepared images on disk after recognition.
    pub fn keep_intermediate(mut self, keep: bool) -> Self {
        self.keep_intermediate = keep;
        self
    }

    /// Recognize one image and extract its contact.
    ///
    /// The engine is released whether or not recognition succeeds.
    pub fn scan<R: TextRecognizer>(&self, engine: R, image: &Path) -> Result<ExtractionResult> {
        info!("Scanning {}", image.display());
        let mut session = RecognitionSession::acquire(engine);

        let prepared = match &self.preparer {
            Some(preparer) if session.wants_preprocessing() => Some(preparer.prepare(image)?),
            _ => None,
        };
        let target = prepared.as_deref().unwrap_or(image);

        let output = session.recognize(target);
        let released = session.finish();

        if let Some(path) = &prepared {
            if !self.keep_intermediate {
                if let Err(e) = fs::remove_file(path) {
                    warn!("Failed to remove {}: {}", path.display(), e);
                }
            }
        }

        let output = output?;
        released?;
        debug!(
            "Recognized {} characters at confidence {:.1}",
            output.text.len(),
            output.confidence
        );

        Ok(self.extractor.extract(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CardscanError, OcrError};
    use crate::models::RawOcrOutput;
    use crate::ocr::SidecarRecognizer;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedEngine {
        output: std::result::Result<RawOcrOutput, OcrError>,
        seen: Arc<std::sync::Mutex<Vec<PathBuf>>>,
        released: Arc<AtomicUsize>,
    }

    impl TextRecognizer for FixedEngine {
        fn recognize(&mut self, image: &Path) -> std::result::Result<RawOcrOutput, OcrError> {
            self.seen.lock().unwrap().push(image.to_path_buf());
            self.output.clone()
        }

        fn terminate(&mut self) -> std::result::Result<(), OcrError> {
            self.released.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn engine(output: std::result::Result<RawOcrOutput, OcrError>) -> FixedEngine {
        FixedEngine {
            output,
            seen: Arc::default(),
            released: Arc::default(),
        }
    }

    /// Copies the image to `<name>.prepared` instead of decoding it.
    struct CopyPreparer;

    impl ImagePreparer for CopyPreparer {
        fn prepare(&self, image: &Path) -> std::result::Result<PathBuf, OcrError> {
            let target = image.with_extension("prepared");
            fs::copy(image, &target).map_err(|e| OcrError::Preprocessing(e.to_string()))?;
            Ok(target)
        }
    }

    struct FailingPreparer;

    impl ImagePreparer for FailingPreparer {
        fn prepare(&self, _image: &Path) -> std::result::Result<PathBuf, OcrError> {
            Err(OcrError::Preprocessing("corrupt image".to_string()))
        }
    }

    #[test]
    fn test_scan_extracts_contact() {
        let engine = engine(Ok(RawOcrOutput::new("Jane Roe\njane@globex.fr", 80.0)));
        let released = Arc::clone(&engine.released);

        let result = CardScanner::new().scan(engine, Path::new("card.png")).unwrap();

        assert_eq!(result.email.as_deref(), Some("jane@globex.fr"));
        assert_eq!(result.full_name.as_deref(), Some("Jane Roe"));
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_engine_released_on_recognition_failure() {
        let engine = engine(Err(OcrError::Recognition("blurry".to_string())));
        let released = Arc::clone(&engine.released);

        let result = CardScanner::new().scan(engine, Path::new("card.png"));

        assert!(matches!(result, Err(CardscanError::Ocr(OcrError::Recognition(_)))));
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_engine_released_on_preparation_failure() {
        let engine = engine(Ok(RawOcrOutput::new("Jane Roe", 80.0)));
        let released = Arc::clone(&engine.released);

        let result = CardScanner::new()
            .with_preparer(FailingPreparer)
            .scan(engine, Path::new("card.png"));

        assert!(matches!(result, Err(CardscanError::Ocr(OcrError::Preprocessing(_)))));
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_prepared_image_is_recognized_then_removed() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("card.png");
        fs::write(&image, b"pixels").unwrap();

        let engine = engine(Ok(RawOcrOutput::new("Jane Roe", 80.0)));
        let seen = Arc::clone(&engine.seen);

        CardScanner::new()
            .with_preparer(CopyPreparer)
            .scan(engine, &image)
            .unwrap();

        let prepared = dir.path().join("card.prepared");
        assert_eq!(*seen.lock().unwrap(), vec![prepared.clone()]);
        assert!(!prepared.exists());
    }

    #[test]
    fn test_keep_intermediate() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("card.png");
        fs::write(&image, b"pixels").unwrap();

        CardScanner::new()
            .with_preparer(CopyPreparer)
            .keep_intermediate(true)
            .scan(engine(Ok(RawOcrOutput::new("", 0.0))), &image)
            .unwrap();

        assert!(dir.path().join("card.prepared").exists());
    }

    #[test]
    fn test_sidecar_skips_preparation() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("card.png");
        fs::write(dir.path().join("card.txt"), "JANE ROE\nDesigner").unwrap();

        let result = CardScanner::new()
            .with_preparer(FailingPreparer)
            .scan(SidecarRecognizer::new(), &image)
            .unwrap();

        assert_eq!(result.full_name.as_deref(), Some("Jane Roe"));
        assert_eq!(result.position.as_deref(), Some("Designer"));
    }
}
