//! Relevance Scorer: ranks catalog products against an extracted health
//! assessment. Pure per-product computation; batch scoring is a
//! map+filter+sort+truncate with no cross-product dependency.

pub mod scorer;
pub mod types;
pub mod weights;

pub use scorer::{derive_urgency, RelevanceScorer};
pub use types::{ContextualRecommendation, ReasonKind, RecommendationReason, UrgencyLevel};
pub use weights::{weights_for, ScoringWeights};
