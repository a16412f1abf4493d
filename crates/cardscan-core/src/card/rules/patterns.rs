//! Keyword tables and regex patterns for business card extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Top-level domains used to repair emails and websites whose dot was lost.
pub const KNOWN_TLDS: &[&str] = &[
    "com", "fr", "net", "org", "io", "co", "tn", "ma", "dz", "de", "uk", "es", "it", "edu", "gov",
    "info", "biz",
];

/// Words that mark a line as part of a postal address.
pub const ADDRESS_KEYWORDS: &[&str] = &[
    "street", "st", "avenue", "ave", "road", "rd", "boulevard", "blvd", "rue", "route", "state",
    "country", "zip", "postal", "bp", "city", "ville",
];

/// Role patterns recognised in job titles (regex fragments).
pub const ROLE_KEYWORDS: &[&str] = &[
    r"CEO",
    r"CTO",
    r"CFO",
    r"COO",
    r"Co-?Founder",
    r"Founder",
    r"General\s+Manager",
    r"Product\s+Manager",
    r"Project\s+Manager",
    r"Manager",
    r"Director",
    r"Engineer",
    r"Developer",
    r"Designer",
    r"Sales",
    r"Marketing",
    r"Chief\s+\w+",
];

/// Legal-entity suffixes that identify a company line.
pub const LEGAL_ENTITY_KEYWORDS: &[&str] = &[
    "company",
    "corp",
    "corporation",
    "inc",
    "sarl",
    "sas",
    "ltd",
    "gmbh",
    "sa",
    "spa",
];

/// Join plain words into a regex alternation.
fn word_alternation(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Accented Latin letters accepted in person names.
const NAME_LETTERS: &str = r"A-Za-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{FF}";

lazy_static! {
    static ref TLD_GROUP: String = word_alternation(KNOWN_TLDS);

    // Email patterns
    pub static ref EMAIL_STRICT: Regex = Regex::new(
        r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b"
    ).unwrap();

    /// "name@domain com"
    pub static ref EMAIL_SPACED_TLD: Regex = Regex::new(&format!(
        r"(?i)\b([A-Z0-9._%+-]+)@([A-Z0-9.-]+)[^\S\n]+({})\b",
        *TLD_GROUP
    )).unwrap();

    /// "name@domaincom"
    pub static ref EMAIL_JOINED_TLD: Regex = Regex::new(&format!(
        r"(?i)\b([A-Z0-9._%+-]+)@([A-Z0-9.-]+)({})\b",
        *TLD_GROUP
    )).unwrap();

    /// Any whitespace-free token containing '@', complete or not.
    pub static ref EMAIL_TOKEN: Regex = Regex::new(
        r"[^\s,;]*@[^\s,;]*"
    ).unwrap();

    // Phone pattern
    pub static ref PHONE: Regex = Regex::new(
        r"\+?[0-9][0-9 ().\-]{7,}"
    ).unwrap();

    // Website patterns
    pub static ref WEBSITE_STRICT: Regex = Regex::new(
        r"(?i)\b((?:https?://)?(?:www\.)?[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,})(?:/[^\s]*)?\b"
    ).unwrap();

    /// "www acme com"
    pub static ref WEBSITE_SPACED: Regex = Regex::new(&format!(
        r"(?i)\bwww[^\S\n]+([a-z0-9-]+)[^\S\n]+({})\b",
        *TLD_GROUP
    )).unwrap();

    pub static ref URL_TOKEN: Regex = Regex::new(
        r"(?i)\b(?:https?://|www\.)[^\s,;]+"
    ).unwrap();

    // Address patterns
    pub static ref ADDRESS_KEYWORD: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})\b",
        word_alternation(ADDRESS_KEYWORDS)
    )).unwrap();

    pub static ref HOUSE_NUMBER: Regex = Regex::new(
        r"^[0-9]{1,5}[^,]*[, ]"
    ).unwrap();

    pub static ref DIGITS_COMMA_LETTERS: Regex = Regex::new(
        r"[0-9].*,.*[A-Za-z]"
    ).unwrap();

    pub static ref ALNUM_COMMA_ALNUM: Regex = Regex::new(
        r"[0-9A-Za-z].*,.*[0-9A-Za-z]"
    ).unwrap();

    pub static ref COMMA_RUN: Regex = Regex::new(
        r"\s*,(?:\s*,)+"
    ).unwrap();

    pub static ref EDGE_COMMAS: Regex = Regex::new(
        r"^[\s,]+|[\s,]+$"
    ).unwrap();

    /// Stray glyph read before a capitalised word, e.g. "Q Street".
    pub static ref OCR_HEAD: Regex = Regex::new(
        r"^[A-Za-z]\s+([A-Z])"
    ).unwrap();

    pub static ref MULTI_SPACE: Regex = Regex::new(
        r"\s{2,}"
    ).unwrap();

    // Person name patterns
    pub static ref NAME_NOISE: Regex = Regex::new(&format!(
        r"[^{NAME_LETTERS}' -]"
    )).unwrap();

    pub static ref NAME_CAPITALIZED: Regex = Regex::new(&format!(
        r"^[A-Z][{NAME_LETTERS}'-]{{2,}}\s+[A-Z][{NAME_LETTERS}'-]{{2,}}$"
    )).unwrap();

    pub static ref NAME_ALL_CAPS: Regex = Regex::new(
        r"^[A-Z]{2,}\s+[A-Z]{2,}$"
    ).unwrap();

    // Job title pattern
    pub static ref ROLE: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})\b",
        ROLE_KEYWORDS.join("|")
    )).unwrap();

    // Company patterns
    pub static ref LEGAL_ENTITY: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})\b",
        word_alternation(LEGAL_ENTITY_KEYWORDS)
    )).unwrap();

    /// Web fragments trailing a company name ("Acme Corp www.acme.com").
    pub static ref WEB_FRAGMENT: Regex = Regex::new(
        r"(?i)\b(?:www|\.com|\.fr).*"
    ).unwrap();
}
