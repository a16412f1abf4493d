//! Data models and configuration.

pub mod config;
pub mod contact;

pub use config::CardscanConfig;
pub use contact::{Contact, ExtractionResult, FieldScore, FieldScores, RawOcrOutput};
