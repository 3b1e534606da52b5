//! Turn pipeline: extraction, scoring, generation, validation, and
//! persistence for one customer message.

pub mod turn;

use thiserror::Error;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conversation::{ConversationState, StoreError};
use crate::escalation::{EscalationError, EscalationRecord};
use crate::generation::GenerationError;
use crate::scoring::ContextualRecommendation;
use crate::validation::ValidationResult;

pub use turn::ConversationPipeline;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Escalation(#[from] EscalationError),
}

/// How the turn was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// A validated generated reply went out.
    Answered,
    /// The generation backend was unavailable; a "try again" reply went out.
    Busy,
    /// The generated reply failed validation; a safe fallback went out.
    Fallback,
    /// The turn was handed to a human agent.
    Escalated,
}

/// Everything a caller needs after one turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub conversation_id: Uuid,
    pub reply: String,
    pub kind: TurnKind,
    pub state: ConversationState,
    pub recommendations: Vec<ContextualRecommendation>,
    /// Absent when no reply was generated (busy or pre-generation hand-off).
    pub validation: Option<ValidationResult>,
    pub escalation: Option<EscalationRecord>,
}
