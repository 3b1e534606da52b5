use serde::{Deserialize, Serialize};

use super::intent::MessageIntent;

/// Where the conversation currently is. Transitions are driven by the
/// classified intent of the latest customer message plus whether the
/// assistant's reply recommended products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Greeting,
    GeneralSupport,
    HealthInquiry,
    ProductRecommendation,
    OrderCollection,
    OrderConfirmation,
    ConversationComplete,
}

impl ConversationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::GeneralSupport => "general_support",
            Self::HealthInquiry => "health_inquiry",
            Self::ProductRecommendation => "product_recommendation",
            Self::OrderCollection => "order_collection",
            Self::OrderConfirmation => "order_confirmation",
            Self::ConversationComplete => "conversation_complete",
        }
    }

    /// Compute the next state. A completed conversation holds; any customer
    /// message after completion starts a new conversation upstream. The
    /// terminal state is only reachable once the order draft is complete.
    pub fn advance(
        self,
        intent: MessageIntent,
        reply_recommended_products: bool,
        order_complete: bool,
    ) -> Self {
        if self == Self::ConversationComplete {
            return self;
        }
        match intent {
            MessageIntent::OrderRequest => Self::OrderCollection,
            MessageIntent::Confirmation => match self {
                Self::OrderCollection => Self::OrderConfirmation,
                Self::OrderConfirmation if order_complete => Self::ConversationComplete,
                other => other,
            },
            MessageIntent::HealthComplaint => {
                if reply_recommended_products {
                    Self::ProductRecommendation
                } else {
                    Self::HealthInquiry
                }
            }
            MessageIntent::ProductInquiry | MessageIntent::PriceInquiry => {
                Self::ProductRecommendation
            }
            MessageIntent::Greeting | MessageIntent::Other => match self {
                Self::Greeting => Self::GeneralSupport,
                other => other,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_with_order_intent_jumps_to_order_collection() {
        let next = ConversationState::Greeting.advance(MessageIntent::OrderRequest, false, false);
        assert_eq!(next, ConversationState::OrderCollection);
    }

    #[test]
    fn confirmation_walks_the_order_states() {
        let collecting = ConversationState::OrderCollection;
        let confirming = collecting.advance(MessageIntent::Confirmation, false, false);
        assert_eq!(confirming, ConversationState::OrderConfirmation);
        let done = confirming.advance(MessageIntent::Confirmation, false, true);
        assert_eq!(done, ConversationState::ConversationComplete);
    }

    #[test]
    fn incomplete_order_cannot_close_the_conversation() {
        let confirming = ConversationState::OrderConfirmation;
        assert_eq!(
            confirming.advance(MessageIntent::Confirmation, false, false),
            ConversationState::OrderConfirmation
        );
    }

    #[test]
    fn complete_is_terminal() {
        let state = ConversationState::ConversationComplete;
        assert_eq!(state.advance(MessageIntent::OrderRequest, true, true), state);
        assert_eq!(state.advance(MessageIntent::HealthComplaint, true, false), state);
    }

    #[test]
    fn health_complaint_branches_on_reply_recommendations() {
        let base = ConversationState::GeneralSupport;
        assert_eq!(
            base.advance(MessageIntent::HealthComplaint, false, false),
            ConversationState::HealthInquiry
        );
        assert_eq!(
            base.advance(MessageIntent::HealthComplaint, true, false),
            ConversationState::ProductRecommendation
        );
    }

    #[test]
    fn stray_confirmation_outside_order_flow_holds_state() {
        let state = ConversationState::HealthInquiry;
        assert_eq!(state.advance(MessageIntent::Confirmation, false, false), state);
    }
}
