use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// UrgencyLevel
// ---------------------------------------------------------------------------

/// How quickly the customer's complaint should be addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Routine,
    Soon,
    Urgent,
    Emergency,
}

// ---------------------------------------------------------------------------
// RecommendationReason
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKind {
    SymptomMatch,
    ConditionMatch,
    TemporalFit,
    SeverityFit,
    ProfileFit,
}

/// One human-readable justification for a recommendation, usable as
/// evidence in the generation prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReason {
    pub kind: ReasonKind,
    pub explanation: String,
    pub confidence: f32,
    /// The matched term or feature that produced this reason.
    pub evidence: String,
}

// ---------------------------------------------------------------------------
// ContextualRecommendation
// ---------------------------------------------------------------------------

/// A scored product for the current turn. Ephemeral; the top-K are kept on
/// the conversation for "that product" reference resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextualRecommendation {
    pub product_id: String,
    pub product_name: String,
    /// Always in [0,1].
    pub relevance_score: f32,
    pub reasons: Vec<RecommendationReason>,
    pub urgency: UrgencyLevel,
}
