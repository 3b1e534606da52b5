use serde::{Deserialize, Serialize};

use crate::lexicon::{Severity, TermKind};

// ---------------------------------------------------------------------------
// ExtractedItem
// ---------------------------------------------------------------------------

/// One symptom or condition detected in a message. Produced fresh per turn;
/// `confidence` is always match-similarity x lexicon base confidence, so it
/// stays in [0,1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Canonical lexicon term.
    pub term: String,
    /// The text in the message that matched.
    pub original_text: String,
    pub confidence: f32,
    pub severity: Severity,
    pub kind: TermKind,
    /// English equivalents, used for catalog search.
    pub mapped_terms: Vec<String>,
    /// Context-clue phrases found in the message or recent turns.
    pub matched_context_clues: Vec<String>,
}

// ---------------------------------------------------------------------------
// Temporal context
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomDuration {
    Acute,
    Subacute,
    Chronic,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomFrequency {
    Occasional,
    Frequent,
    Constant,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomProgression {
    Improving,
    Worsening,
    Stable,
    #[default]
    Unknown,
}

/// How long, how often, and which way the complaint is heading.
/// Each axis defaults to Unknown and is filled by an independent scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalContext {
    pub duration: SymptomDuration,
    pub frequency: SymptomFrequency,
    pub progression: SymptomProgression,
}

// ---------------------------------------------------------------------------
// ExtractedHealthData
// ---------------------------------------------------------------------------

/// Everything the extractor learned from one message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedHealthData {
    pub symptoms: Vec<ExtractedItem>,
    pub conditions: Vec<ExtractedItem>,
    pub temporal: TemporalContext,
}

impl ExtractedHealthData {
    /// True when the message carried no health signal at all.
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty() && self.conditions.is_empty()
    }

    /// Highest assessed severity across all items; Moderate when nothing
    /// carries a meaningful severity.
    pub fn assessed_severity(&self) -> Severity {
        self.symptoms
            .iter()
            .chain(self.conditions.iter())
            .map(|i| i.severity)
            .filter(|s| *s != Severity::Any)
            .max()
            .unwrap_or(Severity::Moderate)
    }

    /// Canonical terms plus English equivalents, for catalog search.
    pub fn search_terms(&self) -> Vec<String> {
        let mut terms = Vec::new();
        for item in self.symptoms.iter().chain(self.conditions.iter()) {
            terms.push(item.term.clone());
            terms.extend(item.mapped_terms.iter().cloned());
        }
        terms.dedup();
        terms
    }
}
