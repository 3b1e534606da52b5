//! Term Extractor: free text in, canonical health terms out.
//!
//! Extraction never fails for well-formed string input; empty or
//! unrecognized messages yield empty results and the caller decides how to
//! proceed (catalog-wide candidates, clarifying question).

pub mod extractor;
pub mod fuzzy;
pub mod normalize;
pub mod temporal;
pub mod types;

pub use extractor::HealthTermExtractor;
pub(crate) use extractor::contains_phrase;
pub use normalize::{normalize_text, tokenize};
pub use types::{
    ExtractedHealthData, ExtractedItem, SymptomDuration, SymptomFrequency, SymptomProgression,
    TemporalContext,
};
