use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::CustomerProfile;
use crate::scoring::ContextualRecommendation;

use super::state::ConversationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    Customer,
    Assistant,
}

/// One utterance in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// What the customer has put together so far when ordering. The state
/// machine only closes a conversation once all three pieces are in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    pub items: Vec<String>,
    pub delivery_address: Option<String>,
    pub payment_confirmed: bool,
}

impl OrderDraft {
    pub fn is_complete(&self) -> bool {
        !self.items.is_empty() && self.delivery_address.is_some() && self.payment_confirmed
    }
}

/// Full state of one customer conversation.
///
/// Updates are functional: each `with_*` method consumes the context and
/// returns a new one, so a failed turn can simply drop its working copy and
/// the stored context is never half-updated. `revision` only advances in
/// the store, on a successful compare-and-set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    pub id: Uuid,
    pub customer_id: String,
    pub state: ConversationState,
    pub history: Vec<ConversationTurn>,
    pub profile: CustomerProfile,
    /// Top recommendations from the latest scored turn, kept so "yang tadi"
    /// and "produk itu" can be resolved next turn.
    pub active_recommendations: Vec<ContextualRecommendation>,
    pub order: OrderDraft,
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
}

impl ConversationContext {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id: customer_id.into(),
            state: ConversationState::Greeting,
            history: Vec::new(),
            profile: CustomerProfile::default(),
            active_recommendations: Vec::new(),
            order: OrderDraft::default(),
            revision: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn with_order(mut self, order: OrderDraft) -> Self {
        self.order = order;
        self.updated_at = Utc::now();
        self
    }

    pub fn with_state(mut self, state: ConversationState) -> Self {
        self.state = state;
        self.updated_at = Utc::now();
        self
    }

    pub fn with_turn(mut self, role: TurnRole, text: impl Into<String>) -> Self {
        self.history.push(ConversationTurn {
            role,
            text: text.into(),
            at: Utc::now(),
        });
        self.updated_at = Utc::now();
        self
    }

    pub fn with_recommendations(mut self, recs: Vec<ContextualRecommendation>) -> Self {
        self.active_recommendations = recs;
        self.updated_at = Utc::now();
        self
    }

    /// Record conditions the customer has now mentioned, deduplicated.
    pub fn noting_conditions<I>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        for condition in conditions {
            if !self
                .profile
                .known_conditions
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&condition))
            {
                self.profile.known_conditions.push(condition);
            }
        }
        self.updated_at = Utc::now();
        self
    }

    /// Recent customer utterances, newest last, for extraction context.
    pub fn recent_customer_texts(&self, limit: usize) -> Vec<&str> {
        self.history
            .iter()
            .rev()
            .filter(|t| t.role == TurnRole::Customer)
            .take(limit)
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    /// Customer turns so far, used to gauge how invested the conversation is.
    pub fn customer_turn_count(&self) -> usize {
        self.history
            .iter()
            .filter(|t| t.role == TurnRole::Customer)
            .count()
    }
}
