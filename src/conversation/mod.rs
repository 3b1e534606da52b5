//! Conversation state machine, context, and persistence.
//!
//! The context is threaded functionally through a turn: the pipeline works
//! on its own copy and only a fully valid turn is written back, guarded by
//! an optimistic revision check.

pub mod context;
pub mod intent;
pub mod state;
pub mod store;

use thiserror::Error;

pub use context::{ConversationContext, ConversationTurn, OrderDraft, TurnRole};
pub use intent::{classify_intent, MessageIntent};
pub use state::ConversationState;
pub use store::{ConversationStore, InMemoryConversationStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conversation revision conflict: expected {expected}, found {found}")]
    RevisionConflict { expected: u64, found: u64 },

    #[error("conversation store lock poisoned: {0}")]
    Lock(String),
}
