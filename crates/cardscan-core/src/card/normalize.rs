//! Repair of common OCR text artifacts before field extraction.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::rules::patterns::KNOWN_TLDS;

lazy_static! {
    static ref DOT_SPACING: Regex = Regex::new(r"[^\S\n]*\.[^\S\n]*").unwrap();

    static ref SPACED_TLD: Regex = Regex::new(&format!(
        r"(?i)(www\.[a-z0-9-]+)[^\S\n]+({})\b",
        KNOWN_TLDS.join("|")
    )).unwrap();

    static ref AT_SPACING: Regex = Regex::new(r"[^\S\n]*@[^\S\n]*").unwrap();

    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Normalized OCR text and its reading-order line view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
}

impl NormalizedText {
    /// Normalize raw OCR output.
    pub fn new(raw: &str) -> Self {
        Self {
            text: normalize(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Trimmed, non-empty lines in reading order.
    pub fn lines(&self) -> Vec<&str> {
        segment_lines(&self.text)
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Repair OCR artifacts in recognized text.
///
/// Line breaks are canonicalized first; every later repair works on
/// horizontal whitespace only so the line structure survives.
pub fn normalize(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");

    // '|' is how serif capitals come back from the engine
    let text = text.replace('|', "I");

    // "name . com" -> "name.com"
    let text = DOT_SPACING.replace_all(&text, ".");

    // "www.acme com" -> "www.acme.com"
    let text = SPACED_TLD.replace_all(&text, "$1.$2");

    // "john @ acme.com" -> "john@acme.com"
    let text = AT_SPACING.replace_all(&text, "@");

    let text = collapse_whitespace(&text);

    text.trim().to_string()
}

/// Collapse whitespace runs; a run that spans a line break stays a line break.
fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE_RUN.replace_all(text, |caps: &Captures| {
        if caps[0].contains('\n') { "\n" } else { " " }
    })
}

/// Split normalized text into trimmed, non-empty lines.
pub fn segment_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}
