//! Image preprocessing for OCR.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, GrayImage, ImageDecoder, ImageReader};
use tracing::debug;

use crate::error::OcrError;
use crate::models::config::PreprocessingConfig;

use super::ImagePreparer;

/// Normalizes card photos before recognition: resize to a fixed width,
/// grayscale, sharpen and stretch contrast.
#[derive(Debug, Clone)]
pub struct ImagePreprocessor {
    /// Output width in pixels.
    target_width: u32,
    /// Unsharp mask blur radius.
    sharpen_sigma: f32,
    /// Unsharp mask threshold.
    sharpen_threshold: i32,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self::from_config(&PreprocessingConfig::default())
    }

    pub fn from_config(config: &PreprocessingConfig) -> Self {
        Self {
            target_width: config.target_width.max(1),
            sharpen_sigma: config.sharpen_sigma,
            sharpen_threshold: config.sharpen_threshold,
        }
    }

    /// Set output width.
    pub fn with_target_width(mut self, width: u32) -> Self {
        self.target_width = width.max(1);
        self
    }

    /// Produce the prepared grayscale image.
    pub fn process(&self, image: &DynamicImage) -> GrayImage {
        let (width, height) = image.dimensions();
        let target_height = self.scaled_height(width, height);
        debug!(
            "Preprocessing {}x{} image to {}x{}",
            width, height, self.target_width, target_height
        );

        let resized = image.resize_exact(self.target_width, target_height, FilterType::Lanczos3);
        let sharpened = resized
            .grayscale()
            .unsharpen(self.sharpen_sigma, self.sharpen_threshold);

        let mut gray = sharpened.to_luma8();
        stretch_contrast(&mut gray);
        gray
    }

    fn scaled_height(&self, width: u32, height: u32) -> u32 {
        if width == 0 {
            return height.max(1);
        }
        let scaled = height as u64 * self.target_width as u64 / width as u64;
        scaled.clamp(1, u32::MAX as u64) as u32
    }

    /// Prepare `image` and write the result to `output`.
    pub fn prepare_to(&self, image: &Path, output: &Path) -> Result<(), OcrError> {
        let source = open_upright(image)
            .map_err(|e| OcrError::Preprocessing(format!("{}: {}", image.display(), e)))?;

        self.process(&source)
            .save(output)
            .map_err(|e| OcrError::Preprocessing(format!("{}: {}", output.display(), e)))?;

        debug!("Prepared image written to {}", output.display());
        Ok(())
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImagePreparer for ImagePreprocessor {
    fn prepare(&self, image: &Path) -> Result<PathBuf, OcrError> {
        let output = prepared_path(image);
        self.prepare_to(image, &output)?;
        Ok(output)
    }
}

/// Path of the prepared copy of an image: `<stem>_prep.png` next to it.
pub fn prepared_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{stem}_prep.png"))
}

/// Decode an image and rotate or flip it as its EXIF orientation says.
fn open_upright(path: &Path) -> image::ImageResult<DynamicImage> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;

    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Linearly map the darkest pixel to 0 and the brightest to 255.
fn stretch_contrast(image: &mut GrayImage) {
    let (min, max) = image
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
    if max <= min {
        return;
    }

    let range = (max - min) as u32;
    for pixel in image.pixels_mut() {
        pixel[0] = ((pixel[0] - min) as u32 * 255 / range) as u8;
    }
}
