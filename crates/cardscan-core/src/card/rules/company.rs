//! Company name extraction.
//!
//! The only extractor that depends on other fields: when no line carries a
//! legal-entity suffix, the company is derived from the website and then
//! from the email domain.

use super::patterns::{LEGAL_ENTITY, WEB_FRAGMENT};
use super::title_case;
use crate::models::FieldScore;

/// Company field extractor.
pub struct CompanyExtractor;

impl CompanyExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the company from card lines, falling back on the already
    /// extracted website and email.
    pub fn extract(
        &self,
        lines: &[&str],
        website: Option<&str>,
        email: Option<&str>,
    ) -> FieldScore<String> {
        if let Some(line) = lines.iter().find(|l| LEGAL_ENTITY.is_match(l)) {
            let name = WEB_FRAGMENT.replace(line, "");
            let score = FieldScore::found(title_case(name.trim()), 0.8);
            if score.is_present() {
                return score;
            }
        }

        if let Some(name) = website.and_then(domain_label) {
            return FieldScore::found(name, 0.7);
        }

        let email_domain = email.and_then(|e| e.split_once('@')).map(|(_, domain)| domain);
        if let Some(name) = email_domain.and_then(domain_label) {
            return FieldScore::found(name, 0.65);
        }

        FieldScore::none()
    }
}

impl Default for CompanyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Title-cased first label of a domain ("https://www.acme.io/x" -> "Acme").
fn domain_label(domain: &str) -> Option<String> {
    let domain = domain.trim().to_lowercase();
    let host = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(&domain);
    let host = host.strip_prefix("www.").unwrap_or(host);

    let label = host.split('/').next()?.split('.').next()?;
    if label.chars().count() >= 3 {
        Some(title_case(label))
    } else {
        None
    }
}

/// Extract the company name.
pub fn extract_company(
    lines: &[&str],
    website: Option<&str>,
    email: Option<&str>,
) -> FieldScore<String> {
    CompanyExtractor::new().extract(lines, website, email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_entity_line() {
        let score = extract_company(&["Jane Roe", "ACME CORP www.acme.com"], None, None);
        assert_eq!(score.as_deref(), Some("Acme Corp"));
        assert_eq!(score.confidence(), 0.8);
    }

    #[test]
    fn test_from_website() {
        let score = extract_company(&["Jane Roe"], Some("www.acme.io"), None);
        assert_eq!(score.as_deref(), Some("Acme"));
        assert_eq!(score.confidence(), 0.7);
    }

    #[test]
    fn test_from_email() {
        let score = extract_company(&["Jane Roe"], None, Some("j@beta.com"));
        assert_eq!(score.as_deref(), Some("Beta"));
        assert_eq!(score.confidence(), 0.65);
    }

    #[test]
    fn test_short_labels_are_ignored() {
        let score = extract_company(&[], Some("https://ab.io/about"), Some("x@globex.fr"));
        assert_eq!(score.as_deref(), Some("Globex"));
        assert_eq!(score.confidence(), 0.65);
    }

    #[test]
    fn test_scheme_and_path_stripped() {
        assert_eq!(domain_label("HTTPS://www.Initech.com/contact"), Some("Initech".to_string()));
    }

    #[test]
    fn test_nothing_to_go_on() {
        assert_eq!(extract_company(&["Jane Roe"], None, None), FieldScore::none());
        assert_eq!(extract_company(&["www.sa.com"], None, Some("x@yz.io")), FieldScore::none());
    }
}
