//! Website extraction.

use super::patterns::{EMAIL_TOKEN, WEBSITE_SPACED, WEBSITE_STRICT};
use super::FieldExtractor;
use crate::models::FieldScore;

/// Website field extractor.
pub struct WebsiteExtractor;

impl WebsiteExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebsiteExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for WebsiteExtractor {
    fn extract(&self, text: &str) -> FieldScore<String> {
        // Email tokens look like domains ("john.smith@...") and never are websites
        let text = EMAIL_TOKEN.replace_all(text, " ");

        if let Some(caps) = WEBSITE_STRICT.captures(&text) {
            return FieldScore::found(caps[1].to_lowercase(), 0.92);
        }

        // "www acme com"
        if let Some(caps) = WEBSITE_SPACED.captures(&text) {
            let site = format!("www.{}.{}", &caps[1], &caps[2]);
            return FieldScore::found(site.to_lowercase(), 0.86);
        }

        FieldScore::none()
    }
}

/// Extract a website from normalized text.
pub fn extract_website(text: &str) -> FieldScore<String> {
    WebsiteExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_website() {
        let score = extract_website("Visit WWW.Acme.IO for more");
        assert_eq!(score.as_deref(), Some("www.acme.io"));
        assert_eq!(score.confidence(), 0.92);
    }

    #[test]
    fn test_scheme_kept_path_dropped() {
        let score = extract_website("https://shop.acme.co.uk/contact");
        assert_eq!(score.as_deref(), Some("https://shop.acme.co.uk"));
    }

    #[test]
    fn test_undotted_www() {
        let score = extract_website("www Accurate com");
        assert_eq!(score.as_deref(), Some("www.accurate.com"));
        assert_eq!(score.confidence(), 0.86);
    }

    #[test]
    fn test_email_is_not_a_website() {
        let score = extract_website("john.smith@acme.com\nwww acme com");
        assert_eq!(score.as_deref(), Some("www.acme.com"));
        assert_eq!(score.confidence(), 0.86);

        assert_eq!(extract_website("john.smith@acme.com"), FieldScore::none());
    }

    #[test]
    fn test_no_website() {
        assert_eq!(extract_website("JOHN SMITH\nCEO"), FieldScore::none());
        assert_eq!(extract_website(""), FieldScore::none());
    }
}
