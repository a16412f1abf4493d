//! Postal address extraction from line-segmented card text.
//!
//! Addresses follow no fixed grammar. Lines are first stripped of email and
//! URL tokens, then candidates are picked by decreasing structural strength:
//! comma density, address keywords or a leading house number, digits
//! followed by a comma, and finally any long comma-separated line.

use super::patterns::{
    ADDRESS_KEYWORD, ALNUM_COMMA_ALNUM, COMMA_RUN, DIGITS_COMMA_LETTERS, EDGE_COMMAS,
    EMAIL_TOKEN, HOUSE_NUMBER, MULTI_SPACE, OCR_HEAD, URL_TOKEN,
};
use super::LineExtractor;
use crate::models::FieldScore;

/// Address field extractor.
pub struct AddressExtractor;

impl AddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineExtractor for AddressExtractor {
    fn extract(&self, lines: &[&str]) -> FieldScore<String> {
        let prepared: Vec<String> = lines
            .iter()
            .map(|l| strip_ocr_head(&strip_contact_tokens(l)))
            .filter(|l| !l.is_empty())
            .collect();

        // Comma-delimited locality structure
        if let Some(line) = prepared.iter().find(|l| comma_count(l) >= 2) {
            let candidate = strip_contact_tokens(line);
            if comma_count(&candidate) >= 2 && has_letter(&candidate) {
                return FieldScore::found(candidate, 0.9);
            }
        }

        // Address keyword or house number, merged with a continuation line
        for (i, line) in prepared.iter().enumerate() {
            if !ADDRESS_KEYWORD.is_match(line) && !HOUSE_NUMBER.is_match(line) {
                continue;
            }

            let continuation = prepared
                .get(i + 1)
                .filter(|next| ADDRESS_KEYWORD.is_match(next) || ALNUM_COMMA_ALNUM.is_match(next));

            let candidate = match continuation {
                Some(next) => strip_contact_tokens(&format!("{line}, {next}")),
                None => strip_contact_tokens(line),
            };
            if !candidate.is_empty() {
                return FieldScore::found(candidate, 0.84);
            }
        }

        if let Some(line) = prepared.iter().find(|l| DIGITS_COMMA_LETTERS.is_match(l)) {
            return FieldScore::found(strip_contact_tokens(line), 0.78);
        }

        if let Some(line) = prepared
            .iter()
            .find(|l| l.contains(',') && l.chars().count() >= 12)
        {
            return FieldScore::found(strip_contact_tokens(line), 0.7);
        }

        FieldScore::none()
    }
}

/// Remove email and URL tokens, then tidy whitespace and comma runs.
fn strip_contact_tokens(line: &str) -> String {
    let line = EMAIL_TOKEN.replace_all(line, " ");
    let line = URL_TOKEN.replace_all(&line, " ");
    let line = COMMA_RUN.replace_all(&line, ", ");
    let line = MULTI_SPACE.replace_all(&line, " ");
    let line = EDGE_COMMAS.replace_all(&line, "");
    line.trim().to_string()
}

/// Drop a single stray glyph read ahead of a capitalized word.
///
/// This also drops a genuine one-letter token in that position.
fn strip_ocr_head(line: &str) -> String {
    OCR_HEAD.replace(line, "$1").into_owned()
}

fn comma_count(s: &str) -> usize {
    s.matches(',').count()
}

fn has_letter(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_alphabetic())
}

/// Extract a postal address from card lines.
pub fn extract_address(lines: &[&str]) -> FieldScore<String> {
    AddressExtractor::new().extract(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_comma_rule_wins_over_keywords() {
        let lines = ["John Doe", "CEO", "12 Main Street, Springfield, USA", "john@x.com"];
        let score = extract_address(&lines);
        assert_eq!(score.as_deref(), Some("12 Main Street, Springfield, USA"));
        assert_eq!(score.confidence(), 0.9);
    }

    #[test]
    fn test_contact_tokens_are_stripped() {
        let lines = ["Street Name, , State, Country, contact@acmecom www.acme.com"];
        let score = extract_address(&lines);
        assert_eq!(score.as_deref(), Some("Street Name, State, Country"));
        assert_eq!(score.confidence(), 0.9);
    }

    #[test]
    fn test_stray_leading_glyph() {
        let lines = ["Q Street Name, State, Country"];
        let score = extract_address(&lines);
        assert_eq!(score.as_deref(), Some("Street Name, State, Country"));
    }

    #[test]
    fn test_keyword_line_merges_with_next() {
        let lines = ["Jane Roe", "221 Baker Street", "London, NW1 6XE"];
        let score = extract_address(&lines);
        assert_eq!(score.as_deref(), Some("221 Baker Street, London, NW1 6XE"));
        assert_eq!(score.confidence(), 0.84);
    }

    #[test]
    fn test_keyword_line_alone() {
        let lines = ["Jane Roe", "14 rue de la Paix", "Sales Director"];
        let score = extract_address(&lines);
        assert_eq!(score.as_deref(), Some("14 rue de la Paix"));
        assert_eq!(score.confidence(), 0.84);
    }

    #[test]
    fn test_house_number_without_keyword() {
        let lines = ["Jane Roe", "42 Wallaby Way"];
        let score = extract_address(&lines);
        assert_eq!(score.as_deref(), Some("42 Wallaby Way"));
        assert_eq!(score.confidence(), 0.84);
    }

    #[test]
    fn test_house_number_line_kept_when_merging() {
        let lines = ["Jane Roe", "42 Wallaby Way", "Sydney, Australia"];
        let score = extract_address(&lines);
        assert_eq!(score.as_deref(), Some("42 Wallaby Way, Sydney, Australia"));
        assert_eq!(score.confidence(), 0.84);
    }

    #[test]
    fn test_unrelated_next_line_not_merged() {
        let lines = ["42 Wallaby Way", "Sales Director"];
        let score = extract_address(&lines);
        assert_eq!(score.as_deref(), Some("42 Wallaby Way"));
    }

    #[test]
    fn test_digits_then_comma() {
        let lines = ["Jane Roe", "Building 7, Tunis"];
        let score = extract_address(&lines);
        assert_eq!(score.as_deref(), Some("Building 7, Tunis"));
        assert_eq!(score.confidence(), 0.78);
    }

    #[test]
    fn test_long_comma_line_fallback() {
        let lines = ["Jane Roe", "Les Berges du Lac, Tunis"];
        let score = extract_address(&lines);
        assert_eq!(score.as_deref(), Some("Les Berges du Lac, Tunis"));
        assert_eq!(score.confidence(), 0.7);
    }

    #[test]
    fn test_no_address() {
        assert_eq!(extract_address(&["Jane Roe", "Designer"]), FieldScore::none());
        assert_eq!(extract_address(&["jane@roe.com"]), FieldScore::none());
        assert_eq!(extract_address(&[]), FieldScore::none());
    }
}
