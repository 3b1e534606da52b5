//! Variation-keyed lookup over the lexicon.
//!
//! Built once at startup; the index owns the entries and exposes read-only
//! views. An optional JSON file can extend the built-in data (new entries
//! replace built-ins with the same canonical term).

use std::collections::HashMap;
use std::path::Path;

use super::data::builtin_entries;
use super::types::HealthLexiconEntry;
use super::LexiconError;

pub struct LexiconIndex {
    entries: Vec<HealthLexiconEntry>,
    /// Every variation string (and every canonical term) -> entry position.
    by_variation: HashMap<String, usize>,
}

impl LexiconIndex {
    /// Index over the built-in lexicon only.
    pub fn builtin() -> Self {
        // Built-in data is validated by its own tests; from_entries can only
        // fail on out-of-range confidence.
        Self::from_entries(builtin_entries()).expect("builtin lexicon is valid")
    }

    /// Index over built-in data extended by a JSON override file
    /// (an array of entries; same-term entries replace built-ins).
    pub fn with_override_file(path: &Path) -> Result<Self, LexiconError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| LexiconError::Load(path.display().to_string(), e.to_string()))?;
        let overrides: Vec<HealthLexiconEntry> = serde_json::from_str(&json)
            .map_err(|e| LexiconError::Parse(path.display().to_string(), e.to_string()))?;

        let mut entries = builtin_entries();
        for over in overrides {
            if let Some(existing) = entries.iter_mut().find(|e| e.term == over.term) {
                *existing = over;
            } else {
                entries.push(over);
            }
        }
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<HealthLexiconEntry>) -> Result<Self, LexiconError> {
        let mut by_variation = HashMap::new();
        for (pos, entry) in entries.iter().enumerate() {
            if !(0.0..=1.0).contains(&entry.base_confidence) {
                return Err(LexiconError::ConfidenceOutOfRange(
                    entry.term.clone(),
                    entry.base_confidence,
                ));
            }
            by_variation.insert(entry.term.to_lowercase(), pos);
            for variation in &entry.variations {
                // First entry wins on duplicate variations across terms.
                by_variation.entry(variation.to_lowercase()).or_insert(pos);
            }
        }
        tracing::debug!(
            entries = entries.len(),
            variations = by_variation.len(),
            "Lexicon index built"
        );
        Ok(Self {
            entries,
            by_variation,
        })
    }

    /// Look up an entry by any of its variation strings.
    pub fn lookup(&self, variation: &str) -> Option<&HealthLexiconEntry> {
        self.by_variation
            .get(variation)
            .map(|&pos| &self.entries[pos])
    }

    /// All variation keys with their entries, for containment and fuzzy scans.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &HealthLexiconEntry)> {
        self.by_variation
            .iter()
            .map(move |(k, &pos)| (k.as_str(), &self.entries[pos]))
    }

    pub fn entries(&self) -> &[HealthLexiconEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::types::{HealthCategory, Severity};
    use std::io::Write;

    #[test]
    fn builtin_lookup_by_variation() {
        let index = LexiconIndex::builtin();
        let entry = index.lookup("kolestrol").unwrap();
        assert_eq!(entry.term, "kolesterol");
    }

    #[test]
    fn builtin_lookup_by_canonical_term() {
        let index = LexiconIndex::builtin();
        assert_eq!(index.lookup("diabetes").unwrap().term, "diabetes");
    }

    #[test]
    fn unknown_variation_is_none() {
        let index = LexiconIndex::builtin();
        assert!(index.lookup("tidak ada").is_none());
    }

    #[test]
    fn override_file_replaces_same_term() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let over = vec![HealthLexiconEntry {
            term: "diabetes".into(),
            variations: vec!["diabetes melitus".into()],
            english_equivalents: vec!["diabetes".into()],
            category: HealthCategory::Metabolic,
            default_severity: Severity::Severe,
            context_clues: vec![],
            base_confidence: 0.99,
            kind_override: None,
        }];
        write!(file, "{}", serde_json::to_string(&over).unwrap()).unwrap();

        let index = LexiconIndex::with_override_file(file.path()).unwrap();
        let entry = index.lookup("diabetes melitus").unwrap();
        assert_eq!(entry.term, "diabetes");
        assert_eq!(entry.default_severity, Severity::Severe);
        // Variations from the replaced built-in entry are gone.
        assert!(index.lookup("kencing manis").is_none());
    }

    #[test]
    fn out_of_range_confidence_rejected() {
        let bad = vec![HealthLexiconEntry {
            term: "x".into(),
            variations: vec![],
            english_equivalents: vec![],
            category: HealthCategory::General,
            default_severity: Severity::Mild,
            context_clues: vec![],
            base_confidence: 1.5,
            kind_override: None,
        }];
        assert!(matches!(
            LexiconIndex::from_entries(bad),
            Err(LexiconError::ConfidenceOutOfRange(_, _))
        ));
    }
}
