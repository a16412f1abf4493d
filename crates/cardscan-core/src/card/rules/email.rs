//! Email extraction with repair of a lost dot before the TLD.

use super::patterns::{EMAIL_JOINED_TLD, EMAIL_SPACED_TLD, EMAIL_STRICT};
use super::FieldExtractor;
use crate::models::FieldScore;

/// Email field extractor.
pub struct EmailExtractor;

impl EmailExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EmailExtractor {
    fn extract(&self, text: &str) -> FieldScore<String> {
        if let Some(m) = EMAIL_STRICT.find(text) {
            return FieldScore::found(m.as_str().to_lowercase(), 0.96);
        }

        // "name@domain com"
        if let Some(caps) = EMAIL_SPACED_TLD.captures(text) {
            let domain = caps[2].trim_end_matches('.');
            let email = format!("{}@{}.{}", &caps[1], domain, &caps[3]);
            return FieldScore::found(email.to_lowercase(), 0.85);
        }

        // "name@domaincom"
        if let Some(caps) = EMAIL_JOINED_TLD.captures(text) {
            let email = format!("{}@{}.{}", &caps[1], &caps[2], &caps[3]);
            return FieldScore::found(email.to_lowercase(), 0.80);
        }

        FieldScore::none()
    }
}

/// Extract an email address from normalized text.
pub fn extract_email(text: &str) -> FieldScore<String> {
    EmailExtractor::new().extract(text)
}
