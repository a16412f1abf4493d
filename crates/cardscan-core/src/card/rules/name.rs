//! Person name detection near the top of a card.

use super::patterns::{MULTI_SPACE, NAME_ALL_CAPS, NAME_CAPITALIZED, NAME_NOISE};
use super::{title_case, LineExtractor};
use crate::models::FieldScore;

/// Number of leading lines searched for a name.
const NAME_SCAN_LINES: usize = 5;

/// Person name extractor.
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineExtractor for NameExtractor {
    fn extract(&self, lines: &[&str]) -> FieldScore<String> {
        for line in lines.iter().take(NAME_SCAN_LINES) {
            let stripped = NAME_NOISE.replace_all(line, "");
            let clean = MULTI_SPACE.replace_all(stripped.trim(), " ");
            if clean.is_empty() {
                continue;
            }

            if NAME_ALL_CAPS.is_match(&clean) {
                return FieldScore::found(title_case(&clean), 0.85);
            }

            if NAME_CAPITALIZED.is_match(&clean) {
                return FieldScore::found(clean, 0.9);
            }
        }

        FieldScore::none()
    }
}

/// Guess the card holder's name from the first lines.
pub fn extract_name(lines: &[&str]) -> FieldScore<String> {
    NameExtractor::new().extract(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_caps_is_title_cased() {
        let score = extract_name(&["JOHN SMITH", "CEO & Founder"]);
        assert_eq!(score.as_deref(), Some("John Smith"));
        assert_eq!(score.confidence(), 0.85);
    }

    #[test]
    fn test_capitalized_words() {
        let score = extract_name(&["* Amélie Poulain *", "Designer"]);
        assert_eq!(score.as_deref(), Some("Amélie Poulain"));
        assert_eq!(score.confidence(), 0.9);
    }

    #[test]
    fn test_skips_non_name_lines() {
        let score = extract_name(&["+33 1 23 45 67 89", "acme", "Jean-Luc O'Neil"]);
        assert_eq!(score.as_deref(), Some("Jean-Luc O'Neil"));
    }

    #[test]
    fn test_only_first_five_lines() {
        let lines = ["a", "b", "c", "d", "e", "Jane Roe"];
        assert_eq!(extract_name(&lines), FieldScore::none());
    }

    #[test]
    fn test_three_words_are_not_a_name() {
        assert_eq!(extract_name(&["Mary Ann Smith"]), FieldScore::none());
        assert_eq!(extract_name(&[]), FieldScore::none());
    }
}
