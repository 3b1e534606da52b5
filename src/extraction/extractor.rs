//! The extraction passes: exact variation containment, fuzzy word matching,
//! severity override, temporal scan, dedupe.

use std::collections::HashMap;

use crate::config;
use crate::lexicon::{HealthLexiconEntry, LexiconIndex, Severity, TermKind};

use super::fuzzy::similarity;
use super::normalize::{normalize_text, tokenize};
use super::temporal::extract_temporal;
use super::types::{ExtractedHealthData, ExtractedItem};

static SEVERE_MARKERS: &[&str] = &[
    "parah", "banget", "sekali", "sangat", "berat", "luar biasa",
    "tak tertahankan", "severe", "really bad", "unbearable",
];

static MILD_MARKERS: &[&str] = &[
    "ringan", "sedikit", "agak", "dikit", "mild", "slight", "a little",
];

/// Maps free text to canonical health terms against an immutable lexicon.
pub struct HealthTermExtractor {
    lexicon: LexiconIndex,
}

impl HealthTermExtractor {
    pub fn new(lexicon: LexiconIndex) -> Self {
        Self { lexicon }
    }

    pub fn with_builtin_lexicon() -> Self {
        Self::new(LexiconIndex::builtin())
    }

    /// Extract symptoms, conditions, and temporal context from one message.
    /// `recent_context` (prior turns, concatenated) only feeds context-clue
    /// matching; it cannot introduce new terms.
    ///
    /// Never fails: empty input or no lexicon overlap yields empty lists.
    pub fn extract(&self, message: &str, recent_context: &str) -> ExtractedHealthData {
        let normalized = normalize_text(message);
        if normalized.is_empty() {
            return ExtractedHealthData::default();
        }
        let normalized_context = normalize_text(recent_context);

        let mut candidates: Vec<(ExtractedItem, &HealthLexiconEntry)> = Vec::new();

        // Exact pass: every variation key, whole-phrase containment.
        for (key, entry) in self.lexicon.keys() {
            if contains_phrase(&normalized, key) {
                candidates.push((
                    self.make_item(entry, key, entry.base_confidence, &normalized, &normalized_context),
                    entry,
                ));
            }
        }

        // Fuzzy pass: words of at least FUZZY_MIN_WORD_LEN chars against
        // single-word keys; normalized edit similarity gated at 0.7, the
        // unique best match wins (ambiguous words are skipped).
        for word in tokenize(&normalized) {
            if word.chars().count() < config::FUZZY_MIN_WORD_LEN {
                continue;
            }
            if let Some((entry, sim)) = self.best_fuzzy_match(word) {
                let confidence = sim * entry.base_confidence;
                candidates.push((
                    self.make_item(entry, word, confidence, &normalized, &normalized_context),
                    entry,
                ));
            }
        }

        // Severity override from intensity markers.
        let override_severity = if SEVERE_MARKERS.iter().any(|m| contains_phrase(&normalized, m)) {
            Some(Severity::Severe)
        } else if MILD_MARKERS.iter().any(|m| contains_phrase(&normalized, m)) {
            Some(Severity::Mild)
        } else {
            None
        };
        if let Some(severity) = override_severity {
            for (item, _) in candidates.iter_mut() {
                item.severity = severity;
            }
        }

        let mut symptoms = Vec::new();
        let mut conditions = Vec::new();
        for (item, entry) in candidates {
            match entry.kind() {
                TermKind::Symptom => symptoms.push(item),
                TermKind::Condition => conditions.push(item),
            }
        }

        let symptoms = dedupe_and_rank(symptoms);
        let conditions = dedupe_and_rank(conditions);

        tracing::debug!(
            symptoms = symptoms.len(),
            conditions = conditions.len(),
            "Health term extraction done"
        );

        ExtractedHealthData {
            symptoms,
            conditions,
            temporal: extract_temporal(&normalized),
        }
    }

    fn make_item(
        &self,
        entry: &HealthLexiconEntry,
        matched_text: &str,
        confidence: f32,
        normalized: &str,
        normalized_context: &str,
    ) -> ExtractedItem {
        let matched_context_clues = entry
            .context_clues
            .iter()
            .filter(|clue| {
                let clue = clue.to_lowercase();
                normalized.contains(clue.as_str()) || normalized_context.contains(clue.as_str())
            })
            .cloned()
            .collect();

        ExtractedItem {
            term: entry.term.clone(),
            original_text: matched_text.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
            severity: entry.default_severity,
            kind: entry.kind(),
            mapped_terms: entry.english_equivalents.clone(),
            matched_context_clues,
        }
    }

    /// Best fuzzy match for one word across single-word lexicon keys.
    /// Returns None below the similarity gate, on an exact hit (the exact
    /// pass already emitted it), or when two different terms tie.
    fn best_fuzzy_match(&self, word: &str) -> Option<(&HealthLexiconEntry, f32)> {
        let mut best: Option<(&HealthLexiconEntry, f32)> = None;
        let mut ambiguous = false;

        for (key, entry) in self.lexicon.keys() {
            if key.contains(' ') {
                continue;
            }
            let sim = similarity(word, key);
            if sim < config::FUZZY_MIN_SIMILARITY || sim >= 1.0 {
                continue;
            }
            match best {
                Some((best_entry, best_sim)) => {
                    if sim > best_sim {
                        best = Some((entry, sim));
                        ambiguous = false;
                    } else if (sim - best_sim).abs() < f32::EPSILON
                        && entry.term != best_entry.term
                    {
                        ambiguous = true;
                    }
                }
                None => best = Some((entry, sim)),
            }
        }

        if ambiguous {
            return None;
        }
        best
    }
}

/// Whole-phrase containment: `key` must appear on word boundaries.
pub(crate) fn contains_phrase(normalized: &str, key: &str) -> bool {
    let padded = format!(" {normalized} ");
    padded.contains(&format!(" {key} "))
}

/// Deduplicate by canonical term keeping the highest-confidence instance,
/// then sort descending by confidence (stable, so ties keep input order).
fn dedupe_and_rank(items: Vec<ExtractedItem>) -> Vec<ExtractedItem> {
    let mut best_by_term: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<ExtractedItem> = Vec::new();

    for item in items {
        match best_by_term.get(&item.term) {
            Some(&pos) => {
                if item.confidence > kept[pos].confidence {
                    kept[pos] = item;
                }
            }
            None => {
                best_by_term.insert(item.term.clone(), kept.len());
                kept.push(item);
            }
        }
    }

    kept.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconIndex;

    fn extractor() -> HealthTermExtractor {
        HealthTermExtractor::new(LexiconIndex::builtin())
    }

    // ── Exact pass ─────────────────────────────────────────────

    #[test]
    fn exact_variation_maps_to_canonical_term() {
        let data = extractor().extract("saya punya darah tinggi", "");
        assert!(data.conditions.iter().any(|c| c.term == "hipertensi"));
    }

    #[test]
    fn exact_match_confidence_is_base_confidence() {
        let data = extractor().extract("diabetes saya kambuh", "");
        let item = data.conditions.iter().find(|c| c.term == "diabetes").unwrap();
        assert!((item.confidence - 0.95).abs() < 1e-6);
    }

    #[test]
    fn all_variations_reach_ninety_percent_of_base() {
        let lexicon = LexiconIndex::builtin();
        let ex = extractor();
        for entry in lexicon.entries() {
            for variation in &entry.variations {
                let data = ex.extract(variation, "");
                let found = data
                    .symptoms
                    .iter()
                    .chain(data.conditions.iter())
                    .find(|i| i.term == entry.term);
                let item = found.unwrap_or_else(|| {
                    panic!("variation {variation:?} did not extract {}", entry.term)
                });
                assert!(
                    item.confidence >= 0.9 * entry.base_confidence,
                    "{variation:?}: {} < 0.9 x {}",
                    item.confidence,
                    entry.base_confidence
                );
            }
        }
    }

    #[test]
    fn short_variation_does_not_match_inside_word() {
        // "mag" is a maag variation but must not fire inside "magang".
        let data = extractor().extract("anak saya lagi magang", "");
        assert!(data.conditions.iter().all(|c| c.term != "maag"));
    }

    // ── Fuzzy pass ─────────────────────────────────────────────

    #[test]
    fn single_edit_misspelling_matches() {
        // "kolesteril" is not a listed variation; one edit from "kolesterol".
        let data = extractor().extract("kolesteril saya tinggi", "");
        let item = data
            .conditions
            .iter()
            .find(|c| c.term == "kolesterol")
            .expect("fuzzy match missing");
        assert!(item.confidence >= 0.7 * 0.9);
    }

    #[test]
    fn short_words_skip_fuzzy_pass() {
        // "mua" (3 chars) is one edit from "mual" but below the length gate.
        let data = extractor().extract("mua", "");
        assert!(data.is_empty());
    }

    // ── Scenario from the field ────────────────────────────────

    #[test]
    fn misspelled_metabolic_complaints_both_extracted() {
        let data = extractor().extract("Diabates saya kambuh, kolestrol juga tinggi", "");
        let diabetes = data.conditions.iter().find(|c| c.term == "diabetes");
        let kolesterol = data.conditions.iter().find(|c| c.term == "kolesterol");
        assert!(diabetes.is_some_and(|i| i.confidence > 0.7));
        assert!(kolesterol.is_some_and(|i| i.confidence > 0.7));
    }

    // ── Severity override ──────────────────────────────────────

    #[test]
    fn severe_marker_overrides_default_severity() {
        let data = extractor().extract("sakit kepala parah banget", "");
        let item = data.symptoms.iter().find(|s| s.term == "sakit kepala").unwrap();
        assert_eq!(item.severity, Severity::Severe);
    }

    #[test]
    fn mild_marker_overrides_default_severity() {
        let data = extractor().extract("agak mual dikit", "");
        let item = data.symptoms.iter().find(|s| s.term == "mual").unwrap();
        assert_eq!(item.severity, Severity::Mild);
    }

    #[test]
    fn no_marker_keeps_lexicon_default() {
        let data = extractor().extract("saya diare", "");
        let item = data.symptoms.iter().find(|s| s.term == "diare").unwrap();
        assert_eq!(item.severity, Severity::Moderate);
    }

    // ── Context clues ──────────────────────────────────────────

    #[test]
    fn context_clue_from_recent_turns_recorded() {
        let data = extractor().extract("maag saya kambuh", "kemarin telat makan seharian");
        let item = data.conditions.iter().find(|c| c.term == "maag").unwrap();
        assert!(item
            .matched_context_clues
            .iter()
            .any(|c| c == "telat makan"));
    }

    // ── Dedupe & ordering ──────────────────────────────────────

    #[test]
    fn duplicate_term_keeps_highest_confidence() {
        // "pusing" (variation) and "sakit kepala" (canonical) both map to
        // the same term; one item survives.
        let data = extractor().extract("pusing terus, sakit kepala tiap sore", "");
        let matches: Vec<_> = data
            .symptoms
            .iter()
            .filter(|s| s.term == "sakit kepala")
            .collect();
        assert_eq!(matches.len(), 1);
        assert!((matches[0].confidence - 0.85).abs() < 1e-6);
    }

    #[test]
    fn results_sorted_descending_by_confidence() {
        let data = extractor().extract("kolestrol naik dan diabates kambuh", "");
        assert!(data.conditions.len() >= 2);
        for pair in data.conditions.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        // diabetes (0.95 base) outranks kolesterol (0.9) despite word order.
        assert_eq!(data.conditions[0].term, "diabetes");
    }

    // ── Edge cases ─────────────────────────────────────────────

    #[test]
    fn empty_input_yields_empty_data() {
        assert!(extractor().extract("", "").is_empty());
        assert!(extractor().extract("   \t  ", "").is_empty());
    }

    #[test]
    fn no_lexicon_overlap_yields_empty_data() {
        let data = extractor().extract("mau tanya ongkir ke bandung", "");
        assert!(data.is_empty());
    }
}
