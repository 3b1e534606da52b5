//! Health-term lexicon: immutable reference data mapping colloquial
//! Indonesian/English variations to canonical terms.
//!
//! Loaded once at startup into a read-only index keyed by every variation
//! string; never mutated at runtime.

pub mod data;
pub mod index;
pub mod types;

use thiserror::Error;

pub use index::LexiconIndex;
pub use types::{HealthCategory, HealthLexiconEntry, Severity, TermKind};

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Lexicon load failed ({0}): {1}")]
    Load(String, String),

    #[error("Lexicon parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Lexicon entry {0:?} has base_confidence {1} outside [0,1]")]
    ConfidenceOutOfRange(String, f32),
}
