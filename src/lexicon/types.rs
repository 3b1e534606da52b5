use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Assessed or default severity of a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    /// Severity not meaningful for this term (e.g. a preference).
    Any,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Any => "any",
        }
    }
}

// ---------------------------------------------------------------------------
// HealthCategory & TermKind
// ---------------------------------------------------------------------------

/// Whether a lexicon term describes a transient complaint or a standing
/// condition. Drives which bucket the extractor places an item in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    Symptom,
    Condition,
}

/// Health domain of a lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCategory {
    Metabolic,
    Cardiovascular,
    Digestive,
    Respiratory,
    Pain,
    Sleep,
    General,
}

impl HealthCategory {
    /// Fixed category -> kind table. Metabolic and cardiovascular terms are
    /// standing conditions; the rest present as symptoms except digestive
    /// terms flagged per entry.
    pub fn kind(&self) -> TermKind {
        match self {
            Self::Metabolic | Self::Cardiovascular => TermKind::Condition,
            Self::Digestive | Self::Respiratory | Self::Pain | Self::Sleep | Self::General => {
                TermKind::Symptom
            }
        }
    }
}

// ---------------------------------------------------------------------------
// HealthLexiconEntry
// ---------------------------------------------------------------------------

/// One canonical health term with its known spelling variants.
/// Immutable reference data; `base_confidence` weights every match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthLexiconEntry {
    /// Canonical term, lowercase.
    pub term: String,
    /// Known variations and misspellings, lowercase. The canonical term
    /// itself does not need to be repeated here.
    pub variations: Vec<String>,
    pub english_equivalents: Vec<String>,
    pub category: HealthCategory,
    pub default_severity: Severity,
    /// Phrases in the surrounding message that corroborate this term.
    pub context_clues: Vec<String>,
    /// In [0,1]; multiplied into every match confidence.
    pub base_confidence: f32,
    /// Overrides the category kind table for entries that straddle it
    /// (e.g. "maag" is digestive but a standing condition).
    #[serde(default)]
    pub kind_override: Option<TermKind>,
}

impl HealthLexiconEntry {
    pub fn kind(&self) -> TermKind {
        self.kind_override.unwrap_or_else(|| self.category.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Mild < Severity::Moderate);
        assert!(Severity::Moderate < Severity::Severe);
    }

    #[test]
    fn metabolic_terms_are_conditions() {
        assert_eq!(HealthCategory::Metabolic.kind(), TermKind::Condition);
        assert_eq!(HealthCategory::Pain.kind(), TermKind::Symptom);
    }

    #[test]
    fn kind_override_wins() {
        let entry = HealthLexiconEntry {
            term: "maag".into(),
            variations: vec![],
            english_equivalents: vec!["gastritis".into()],
            category: HealthCategory::Digestive,
            default_severity: Severity::Moderate,
            context_clues: vec![],
            base_confidence: 0.9,
            kind_override: Some(TermKind::Condition),
        };
        assert_eq!(entry.kind(), TermKind::Condition);
    }
}
