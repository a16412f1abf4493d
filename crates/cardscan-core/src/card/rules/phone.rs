//! Phone number extraction.

use super::patterns::{MULTI_SPACE, PHONE};
use super::FieldExtractor;
use crate::models::FieldScore;

/// Phone field extractor.
pub struct PhoneExtractor;

impl PhoneExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    fn extract(&self, text: &str) -> FieldScore<String> {
        match PHONE.find(text) {
            Some(m) => FieldScore::found(MULTI_SPACE.replace_all(m.as_str(), " "), 0.9),
            None => FieldScore::none(),
        }
    }
}

/// Extract a phone number from normalized text.
pub fn extract_phone(text: &str) -> FieldScore<String> {
    PhoneExtractor::new().extract(text)
}
