//! Overall extraction confidence.

use crate::models::FieldScore;

/// Share of the overall score given to field-level agreement.
pub const FIELD_WEIGHT: f64 = 0.6;

/// Share of the overall score given to the OCR engine's own confidence.
pub const OCR_WEIGHT: f64 = 0.4;

/// Blend field confidences with the OCR engine confidence.
///
/// Only fields holding a value contribute to the field average; with none
/// present the average is zero. `ocr_confidence` is on the engine's 0-100
/// scale. The result is an integer percentage in `0..=100`.
pub fn aggregate<'a, T: 'a>(
    fields: impl IntoIterator<Item = &'a FieldScore<T>>,
    ocr_confidence: f32,
) -> u8 {
    let (sum, count) = fields
        .into_iter()
        .filter(|f| f.is_present())
        .fold((0.0f64, 0usize), |(sum, n), f| {
            (sum + f.confidence().clamp(0.0, 1.0) as f64, n + 1)
        });

    let avg_fields = if count == 0 { 0.0 } else { sum / count as f64 };
    let ocr = if ocr_confidence.is_finite() {
        (ocr_confidence as f64 / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let overall = (avg_fields * FIELD_WEIGHT + ocr * OCR_WEIGHT) * 100.0;
    overall.round().clamp(0.0, 100.0) as u8
}
