use tracing::{debug, info, warn};

use crate::config::{CONVERSATION_TTL, TOP_K_RECOMMENDATIONS};
use crate::conversation::{
    classify_intent, ConversationContext, ConversationState, ConversationStore, MessageIntent,
    OrderDraft, TurnRole,
};
use crate::escalation::{
    detect_trigger, escalation_reply, fallback_reply, EscalationReason, EscalationRecord,
    EscalationRouter, EscalationSeverity, FallbackKind, RoutedEscalation,
};
use crate::extraction::{ExtractedHealthData, HealthTermExtractor};
use crate::generation::{build_turn_prompt, system_prompt, GenerativeTextService};
use crate::models::{Product, ProductCatalog};
use crate::scoring::{ContextualRecommendation, RelevanceScorer};
use crate::validation::{extract_mentions, IssueSeverity, ResponseValidator, ValidationResult};

use super::{PipelineError, TurnKind, TurnOutcome};

/// Recent customer turns fed back into extraction as context.
const EXTRACTION_CONTEXT_TURNS: usize = 3;

/// Longest trigger message carried on an escalation record.
const ESCALATION_EXCERPT_CHARS: usize = 200;

/// Turns rendered onto an escalation record for the agent.
const ESCALATION_HISTORY_TURNS: usize = 6;

/// Words like "jalan" or "blok" that mark a message as a delivery address
/// while an order is being collected.
const ADDRESS_MARKERS: &[&str] = &["jalan", "jl", "gang", "blok", "komplek", "perumahan", "rt", "rw"];

/// One customer message in, one vetted reply out.
///
/// The turn works on a private copy of the conversation context; the store
/// only sees a fully assembled turn, written with an optimistic revision
/// check so concurrent turns for the same customer cannot interleave.
pub struct ConversationPipeline<G, C, S>
where
    G: GenerativeTextService,
    C: ProductCatalog,
    S: ConversationStore,
{
    extractor: HealthTermExtractor,
    scorer: RelevanceScorer,
    validator: ResponseValidator,
    generator: G,
    catalog: C,
    store: S,
    escalation: EscalationRouter,
}

impl<G, C, S> ConversationPipeline<G, C, S>
where
    G: GenerativeTextService,
    C: ProductCatalog,
    S: ConversationStore,
{
    pub fn new(
        extractor: HealthTermExtractor,
        generator: G,
        catalog: C,
        store: S,
        escalation: EscalationRouter,
    ) -> Self {
        Self {
            extractor,
            scorer: RelevanceScorer::new(),
            validator: ResponseValidator::new(),
            generator,
            catalog,
            store,
            escalation,
        }
    }

    /// Process one customer message. The customer's stored conversation is
    /// resumed when one is live; a completed or expired one starts fresh.
    pub fn process_turn(
        &self,
        customer_id: &str,
        message: &str,
    ) -> Result<TurnOutcome, PipelineError> {
        let context = match self.store.load(customer_id)? {
            Some(ctx) if ctx.state == ConversationState::ConversationComplete => {
                // A closed conversation stays closed; the revision carries
                // over so the compare-and-set still guards this customer.
                let revision = ctx.revision;
                let mut fresh = ConversationContext::new(customer_id);
                fresh.revision = revision;
                fresh
            }
            Some(ctx) => ctx,
            None => ConversationContext::new(customer_id),
        };
        let expected_revision = context.revision;

        let recent = context
            .recent_customer_texts(EXTRACTION_CONTEXT_TURNS)
            .join(" ");
        let extracted = self.extractor.extract(message, &recent);
        let intent = classify_intent(message, &extracted);
        info!(
            conversation = %context.id,
            state = context.state.as_str(),
            intent = ?intent,
            symptoms = extracted.symptoms.len(),
            conditions = extracted.conditions.len(),
            "turn started"
        );

        // Hard hand-off triggers are checked before any generation.
        if let Some(trigger) = detect_trigger(message, &extracted, &context) {
            let record = EscalationRecord::new(
                context.id,
                customer_id,
                trigger.reason,
                trigger.severity,
                excerpt(message),
            )
            .with_history(rendered_history(&context, ESCALATION_HISTORY_TURNS));
            let routed = self.escalation.escalate(record)?;
            let kind = match trigger.reason {
                EscalationReason::SevereComplaint => FallbackKind::SeekDoctor,
                _ => FallbackKind::Escalated,
            };
            let reply = escalation_reply(kind, routed.next_open);
            return self.finish_escalated(
                context,
                expected_revision,
                message,
                &extracted,
                reply,
                Vec::new(),
                None,
                routed,
            );
        }

        // Messages with nothing to work from get a clarification prompt
        // instead of a generated guess.
        if extracted.is_empty()
            && intent == MessageIntent::Other
            && message.split_whitespace().count() <= 2
        {
            let reply = fallback_reply(FallbackKind::Clarify);
            let context = context
                .with_turn(TurnRole::Customer, message)
                .with_turn(TurnRole::Assistant, reply);
            let stored = self.store.save(context, expected_revision, CONVERSATION_TTL)?;
            return Ok(TurnOutcome {
                conversation_id: stored.id,
                reply: reply.to_string(),
                kind: TurnKind::Fallback,
                state: stored.state,
                recommendations: Vec::new(),
                validation: None,
                escalation: None,
            });
        }

        let recommendations = self.recommend(&extracted, intent, &context);
        let catalog_snapshot = self.catalog.all();
        let order = self.updated_order(&context, intent, message, &recommendations, &catalog_snapshot);

        let draft = match self.generator.generate(
            &system_prompt(),
            &build_turn_prompt(message, &context, &recommendations, &catalog_snapshot),
        ) {
            Ok(generated) => {
                debug!(
                    conversation = %context.id,
                    tokens = ?generated.tokens_used,
                    "reply generated"
                );
                generated.text
            }
            Err(e) if e.is_transient() => {
                warn!(conversation = %context.id, error = %e, "generation unavailable");
                let reply = fallback_reply(FallbackKind::GeneratorBusy);
                let context = context
                    .noting_conditions(extracted.conditions.iter().map(|c| c.term.clone()))
                    .with_turn(TurnRole::Customer, message)
                    .with_turn(TurnRole::Assistant, reply);
                let stored = self.store.save(context, expected_revision, CONVERSATION_TTL)?;
                return Ok(TurnOutcome {
                    conversation_id: stored.id,
                    reply: reply.to_string(),
                    kind: TurnKind::Busy,
                    state: stored.state,
                    recommendations,
                    validation: None,
                    escalation: None,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let validation = self.validator.validate(
            message,
            &draft,
            intent,
            &context,
            &recommendations,
            &catalog_snapshot,
        );

        if validation.is_valid {
            let next_state =
                context
                    .state
                    .advance(intent, !recommendations.is_empty(), order.is_complete());
            let context = context
                .noting_conditions(extracted.conditions.iter().map(|c| c.term.clone()))
                .with_recommendations(recommendations.clone())
                .with_order(order)
                .with_turn(TurnRole::Customer, message)
                .with_turn(TurnRole::Assistant, draft.clone())
                .with_state(next_state);
            let stored = self.store.save(context, expected_revision, CONVERSATION_TTL)?;
            return Ok(TurnOutcome {
                conversation_id: stored.id,
                reply: draft,
                kind: TurnKind::Answered,
                state: stored.state,
                recommendations,
                validation: Some(validation),
                escalation: None,
            });
        }

        // The draft never reaches the customer. State holds; only the
        // exchange itself is recorded.
        warn!(
            conversation = %context.id,
            confidence = validation.confidence,
            issues = validation.issues.len(),
            "generated reply rejected"
        );
        if validation.should_escalate {
            let record = EscalationRecord::new(
                context.id,
                customer_id,
                EscalationReason::ValidationFailure,
                validation_severity(&validation),
                excerpt(message),
            )
            .with_rejected_reply(&draft, &validation)
            .with_history(rendered_history(&context, ESCALATION_HISTORY_TURNS));
            let routed = self.escalation.escalate(record)?;
            let kind = match intent {
                MessageIntent::OrderRequest | MessageIntent::Confirmation => {
                    FallbackKind::OrderHandoff
                }
                _ => FallbackKind::Escalated,
            };
            let reply = escalation_reply(kind, routed.next_open);
            return self.finish_escalated(
                context,
                expected_revision,
                message,
                &extracted,
                reply,
                recommendations,
                Some(validation),
                routed,
            );
        }

        let reply = fallback_reply(FallbackKind::ValidationFailed);
        let context = context
            .noting_conditions(extracted.conditions.iter().map(|c| c.term.clone()))
            .with_turn(TurnRole::Customer, message)
            .with_turn(TurnRole::Assistant, reply);
        let stored = self.store.save(context, expected_revision, CONVERSATION_TTL)?;
        Ok(TurnOutcome {
            conversation_id: stored.id,
            reply: reply.to_string(),
            kind: TurnKind::Fallback,
            state: stored.state,
            recommendations,
            validation: Some(validation),
            escalation: None,
        })
    }

    /// Record the exchange around an escalation and assemble the outcome.
    /// State holds; the hand-off itself does not move the conversation.
    #[allow(clippy::too_many_arguments)]
    fn finish_escalated(
        &self,
        context: ConversationContext,
        expected_revision: u64,
        message: &str,
        extracted: &ExtractedHealthData,
        reply: String,
        recommendations: Vec<ContextualRecommendation>,
        validation: Option<ValidationResult>,
        routed: RoutedEscalation,
    ) -> Result<TurnOutcome, PipelineError> {
        let context = context
            .noting_conditions(extracted.conditions.iter().map(|c| c.term.clone()))
            .with_turn(TurnRole::Customer, message)
            .with_turn(TurnRole::Assistant, reply.clone());
        let stored = self.store.save(context, expected_revision, CONVERSATION_TTL)?;
        Ok(TurnOutcome {
            conversation_id: stored.id,
            reply,
            kind: TurnKind::Escalated,
            state: stored.state,
            recommendations,
            validation,
            escalation: Some(routed.record),
        })
    }

    /// Candidate selection and scoring. With no health signal, product and
    /// price questions fall back to the whole catalog; when nothing scores,
    /// the previous turn's recommendations stay live so "yang tadi" still
    /// resolves.
    fn recommend(
        &self,
        extracted: &ExtractedHealthData,
        intent: MessageIntent,
        context: &ConversationContext,
    ) -> Vec<ContextualRecommendation> {
        let candidates: Vec<Product> = if !extracted.is_empty() {
            self.catalog.list_candidates(&extracted.search_terms())
        } else if matches!(
            intent,
            MessageIntent::ProductInquiry | MessageIntent::PriceInquiry
        ) {
            self.catalog.all()
        } else {
            Vec::new()
        };

        let scored =
            self.scorer
                .score_batch(&candidates, extracted, &context.profile, TOP_K_RECOMMENDATIONS);
        if scored.is_empty() && !context.active_recommendations.is_empty() {
            return context.active_recommendations.clone();
        }
        scored
    }

    /// Advance the order draft from this message: products the customer
    /// names when ordering, a delivery address while collecting, a payment
    /// confirmation at the confirmation step.
    fn updated_order(
        &self,
        context: &ConversationContext,
        intent: MessageIntent,
        message: &str,
        recommendations: &[ContextualRecommendation],
        catalog: &[Product],
    ) -> OrderDraft {
        let mut order = context.order.clone();
        match intent {
            MessageIntent::OrderRequest => {
                let named: Vec<String> = extract_mentions(message, catalog)
                    .map(|mentions| mentions.iter().map(|m| m.product.name.clone()).collect())
                    .unwrap_or_default();
                let wanted = if named.is_empty() {
                    recommendations
                        .first()
                        .map(|r| vec![r.product_name.clone()])
                        .unwrap_or_default()
                } else {
                    named
                };
                for item in wanted {
                    if !order.items.iter().any(|i| i.eq_ignore_ascii_case(&item)) {
                        order.items.push(item);
                    }
                }
            }
            MessageIntent::Confirmation => {
                if context.state == ConversationState::OrderConfirmation {
                    order.payment_confirmed = true;
                }
            }
            _ => {
                if context.state == ConversationState::OrderCollection && looks_like_address(message)
                {
                    order.delivery_address = Some(message.trim().to_string());
                }
            }
        }
        order
    }
}

fn looks_like_address(message: &str) -> bool {
    let normalized = crate::extraction::normalize_text(message);
    let has_marker = ADDRESS_MARKERS
        .iter()
        .any(|m| crate::extraction::contains_phrase(&normalized, m));
    has_marker && message.chars().any(|c| c.is_ascii_digit())
}

fn validation_severity(validation: &ValidationResult) -> EscalationSeverity {
    if validation
        .issues
        .iter()
        .any(|i| i.severity == IssueSeverity::Critical)
    {
        EscalationSeverity::Critical
    } else {
        EscalationSeverity::High
    }
}

fn rendered_history(context: &ConversationContext, limit: usize) -> Vec<String> {
    let skip = context.history.len().saturating_sub(limit);
    context.history[skip..]
        .iter()
        .map(|t| match t.role {
            TurnRole::Customer => format!("Pelanggan: {}", t.text),
            TurnRole::Assistant => format!("Asisten: {}", t.text),
        })
        .collect()
}

fn excerpt(message: &str) -> String {
    message.chars().take(ESCALATION_EXCERPT_CHARS).collect()
}
