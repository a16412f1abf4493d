//! Job title detection.

use super::patterns::ROLE;
use super::LineExtractor;
use crate::models::FieldScore;

/// Job title extractor.
pub struct JobTitleExtractor;

impl JobTitleExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JobTitleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineExtractor for JobTitleExtractor {
    fn extract(&self, lines: &[&str]) -> FieldScore<String> {
        // Returned verbatim: "CEO & FOUNDER" keeps its casing and ampersand
        match lines.iter().find(|l| ROLE.is_match(l)) {
            Some(line) => FieldScore::found(line, 0.88),
            None => FieldScore::none(),
        }
    }
}

/// Find the first line that reads like a job title.
pub fn extract_job_title(lines: &[&str]) -> FieldScore<String> {
    JobTitleExtractor::new().extract(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_title() {
        let score = extract_job_title(&["JOHN SMITH", "CEO & FOUNDER", "Acme"]);
        assert_eq!(score.as_deref(), Some("CEO & FOUNDER"));
        assert_eq!(score.confidence(), 0.88);
    }

    #[test]
    fn test_chief_any_word() {
        let score = extract_job_title(&["Jane Roe", "Chief Happiness Officer"]);
        assert_eq!(score.as_deref(), Some("Chief Happiness Officer"));
    }

    #[test]
    fn test_no_title() {
        assert_eq!(extract_job_title(&["Victor Hugo", "Paris"]), FieldScore::none());
    }
}
