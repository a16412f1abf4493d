//! Rule-based field extractors for business cards.

pub mod address;
pub mod company;
pub mod email;
pub mod name;
pub mod patterns;
pub mod phone;
pub mod title;
pub mod website;

pub use address::{extract_address, AddressExtractor};
pub use company::{extract_company, CompanyExtractor};
pub use email::{extract_email, EmailExtractor};
pub use name::{extract_name, NameExtractor};
pub use patterns::{ADDRESS_KEYWORDS, KNOWN_TLDS, LEGAL_ENTITY_KEYWORDS, ROLE_KEYWORDS};
pub use phone::{extract_phone, PhoneExtractor};
pub use title::{extract_job_title, JobTitleExtractor};
pub use website::{extract_website, WebsiteExtractor};

use crate::models::FieldScore;

/// Extractor working on the whole normalized text.
pub trait FieldExtractor {
    /// Extract the best candidate, or an empty score.
    fn extract(&self, text: &str) -> FieldScore<String>;
}

/// Extractor working on the line-segmented text.
pub trait LineExtractor {
    /// Extract the best candidate, or an empty score.
    fn extract(&self, lines: &[&str]) -> FieldScore<String>;
}

/// Lowercase, split on spaces, underscores and hyphens, capitalize each word.
pub fn title_case(s: &str) -> String {
    s.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("JOHN SMITH"), "John Smith");
        assert_eq!(title_case("acme corp"), "Acme Corp");
        assert_eq!(title_case("jean-pierre_dupont"), "Jean Pierre Dupont");
        assert_eq!(title_case("élodie"), "Élodie");
        assert_eq!(title_case(""), "");
    }
}
