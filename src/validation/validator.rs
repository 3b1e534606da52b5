use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::{MAX_PRODUCTS_PER_REPLY, MIN_QUERY_OVERLAP, RESTART_GREETING_TURNS};
use crate::conversation::{ConversationContext, MessageIntent};
use crate::extraction::{contains_phrase, normalize_text, tokenize};
use crate::models::{Product, ProductCategory};
use crate::scoring::ContextualRecommendation;
use crate::validation::mentions::{extract_mentions, first_price_in, ProductMention};
use crate::validation::types::{IssueKind, IssueSeverity, ValidationIssue, ValidationResult};
use crate::validation::MentionError;

/// Curative and guaranteed-outcome phrases a supplement reply must never
/// make. Checked on normalized text.
const OVERCLAIM_PHRASES: &[&str] = &[
    "menyembuhkan",
    "pasti sembuh",
    "dijamin sembuh",
    "100 sembuh",
    "obat mujarab",
    "tanpa efek samping",
    "menggantikan obat dokter",
];

/// Order-flow vocabulary an order-handling reply is expected to carry.
const ORDER_REPLY_MARKERS: &[&str] = &["pesanan", "order", "alamat", "konfirmasi", "total", "kirim"];

/// Greeting phrases a reply must not open with mid-conversation.
const REPLY_GREETING_OPENERS: &[&str] = &[
    "halo",
    "hai",
    "selamat pagi",
    "selamat siang",
    "selamat sore",
    "selamat malam",
    "selamat datang",
];

/// Phrases that mean the customer asked to look at a different product.
const SWITCH_MARKERS: &[&str] = &["lain", "yang lain", "ganti", "selain", "alternatif"];

/// Tokens shorter than this carry no topical signal in Indonesian chat.
const CONTENT_WORD_MIN_LEN: usize = 4;

/// Past this many history turns a restarting reply escalates instead of
/// merely failing.
const DEEP_CONVERSATION_TURNS: usize = 6;

/// Checks a generated reply against the catalog, the conversation so far and
/// this turn's recommendations before anything reaches the customer.
///
/// The validator itself must not take the reply down with it: any internal
/// failure produces a critical, escalating verdict instead of an error.
#[derive(Debug, Default)]
pub struct ResponseValidator;

impl ResponseValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(
        &self,
        message: &str,
        reply: &str,
        intent: MessageIntent,
        context: &ConversationContext,
        recommendations: &[ContextualRecommendation],
        catalog: &[Product],
    ) -> ValidationResult {
        match self.try_validate(message, reply, intent, context, recommendations, catalog) {
            Ok(result) => {
                debug!(
                    valid = result.is_valid,
                    confidence = result.confidence,
                    issues = result.issues.len(),
                    "reply validated"
                );
                result
            }
            Err(e) => {
                warn!(error = %e, "validator fault, reply withheld");
                ValidationResult::fault(e.to_string())
            }
        }
    }

    fn try_validate(
        &self,
        message: &str,
        reply: &str,
        intent: MessageIntent,
        context: &ConversationContext,
        recommendations: &[ContextualRecommendation],
        catalog: &[Product],
    ) -> Result<ValidationResult, MentionError> {
        let mut issues = Vec::new();
        let normalized_message = normalize_text(message);
        let normalized_reply = normalize_text(reply);
        let query_mentions = extract_mentions(message, catalog)?;
        let reply_mentions = extract_mentions(reply, catalog)?;

        self.check_restart(&normalized_reply, context.history.len(), &mut issues);
        self.check_mentions(intent, &reply_mentions, recommendations, catalog, &mut issues);
        self.check_product_mismatch(intent, &query_mentions, &reply_mentions, &mut issues);
        self.check_context_bleeding(
            &normalized_message,
            &query_mentions,
            &reply_mentions,
            context,
            &mut issues,
        );
        self.check_unrecognized_priced_product(reply, &reply_mentions, &mut issues)?;
        self.check_overclaims(&normalized_reply, &mut issues);
        self.check_intent(intent, reply, &normalized_reply, &mut issues)?;
        self.check_topical_overlap(&normalized_message, &normalized_reply, &mut issues);

        Ok(ValidationResult::from_issues(issues))
    }

    /// A reply that opens with a greeting while the conversation is several
    /// turns deep means the generator dropped the history.
    fn check_restart(
        &self,
        normalized_reply: &str,
        prior_turns: usize,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if prior_turns <= RESTART_GREETING_TURNS {
            return;
        }
        if REPLY_GREETING_OPENERS
            .iter()
            .any(|g| opens_with(normalized_reply, g))
        {
            let severity = if prior_turns > DEEP_CONVERSATION_TURNS {
                IssueSeverity::Critical
            } else {
                IssueSeverity::High
            };
            issues.push(ValidationIssue::new(
                IssueKind::ConversationRestart,
                severity,
                format!("reply greets the customer after {prior_turns} turns"),
            ));
        }
    }

    /// Per-mention checks: recommended set membership, category congruence,
    /// price accuracy, stock honesty. Prices are only held to the catalog
    /// on product and price questions; order-flow sums are out of scope.
    fn check_mentions(
        &self,
        intent: MessageIntent,
        mentions: &[ProductMention<'_>],
        recommendations: &[ContextualRecommendation],
        catalog: &[Product],
        issues: &mut Vec<ValidationIssue>,
    ) {
        let price_checked = matches!(
            intent,
            MessageIntent::ProductInquiry | MessageIntent::PriceInquiry
        );
        let recommended: HashSet<&str> =
            recommendations.iter().map(|r| r.product_id.as_str()).collect();
        let top_category = recommendations
            .first()
            .and_then(|r| category_of(catalog, &r.product_id));

        for mention in mentions {
            let product = mention.product;

            if !recommendations.is_empty() && !recommended.contains(product.id.as_str()) {
                issues.push(ValidationIssue::new(
                    IssueKind::WrongProduct,
                    IssueSeverity::Critical,
                    format!("'{}' was not among the scored recommendations", product.name),
                ));
                if top_category.is_some_and(|c| c != product.category) {
                    issues.push(ValidationIssue::new(
                        IssueKind::CategoryMismatch,
                        IssueSeverity::Medium,
                        format!(
                            "'{}' is {} but the complaint points at {}",
                            product.name,
                            product.category.as_str(),
                            top_category.map(|c| c.as_str()).unwrap_or("unknown"),
                        ),
                    ));
                }
            }

            if let Some(stated) = mention.stated_price {
                if price_checked && stated != product.price_idr {
                    issues.push(ValidationIssue::new(
                        IssueKind::PriceInconsistency,
                        IssueSeverity::Medium,
                        format!(
                            "'{}' priced at {} but catalog says {}",
                            product.name, stated, product.price_idr
                        ),
                    ));
                }
            }

            if !product.in_stock {
                issues.push(ValidationIssue::new(
                    IssueKind::OutOfStockRecommended,
                    IssueSeverity::High,
                    format!("'{}' is out of stock", product.name),
                ));
            }
        }
    }

    /// When the customer asked about a specific product, the reply must talk
    /// about that product, not a different one.
    fn check_product_mismatch(
        &self,
        intent: MessageIntent,
        query_mentions: &[ProductMention<'_>],
        reply_mentions: &[ProductMention<'_>],
        issues: &mut Vec<ValidationIssue>,
    ) {
        if !matches!(
            intent,
            MessageIntent::ProductInquiry | MessageIntent::PriceInquiry
        ) {
            return;
        }
        let (Some(asked), Some(answered)) = (query_mentions.first(), reply_mentions.first()) else {
            return;
        };
        if query_mentions
            .iter()
            .any(|m| m.product.id == answered.product.id)
        {
            return;
        }
        issues.push(ValidationIssue::new(
            IssueKind::ProductMismatch,
            IssueSeverity::Critical,
            format!(
                "customer asked about '{}', reply answers about '{}'",
                asked.product.name, answered.product.name
            ),
        ));
        if asked.product.category != answered.product.category {
            issues.push(ValidationIssue::new(
                IssueKind::CategoryMismatch,
                IssueSeverity::Medium,
                format!(
                    "'{}' is {} but '{}' is {}",
                    answered.product.name,
                    answered.product.category.as_str(),
                    asked.product.name,
                    asked.product.category.as_str(),
                ),
            ));
        }
    }

    /// Two clauses: a reply naming too many products, or a reply drifting to
    /// a different product than the conversation has settled on when the
    /// customer never asked for a switch.
    fn check_context_bleeding(
        &self,
        normalized_message: &str,
        query_mentions: &[ProductMention<'_>],
        reply_mentions: &[ProductMention<'_>],
        context: &ConversationContext,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if reply_mentions.len() > MAX_PRODUCTS_PER_REPLY {
            issues.push(ValidationIssue::new(
                IssueKind::ContextBleeding,
                IssueSeverity::Medium,
                format!(
                    "reply names {} products, at most {} expected",
                    reply_mentions.len(),
                    MAX_PRODUCTS_PER_REPLY
                ),
            ));
        }

        let (Some(dominant), Some(primary)) =
            (context.active_recommendations.first(), reply_mentions.first())
        else {
            return;
        };
        if primary.product.id == dominant.product_id {
            return;
        }
        let switch_requested = query_mentions
            .iter()
            .any(|m| m.product.id == primary.product.id)
            || SWITCH_MARKERS
                .iter()
                .any(|m| contains_phrase(normalized_message, m));
        if !switch_requested {
            issues.push(ValidationIssue::new(
                IssueKind::ContextBleeding,
                IssueSeverity::High,
                format!(
                    "reply switches from '{}' to '{}' unprompted",
                    dominant.product_name, primary.product.name
                ),
            ));
        }
    }

    /// A price in a reply that names no catalog product at all usually means
    /// the generator invented a product.
    fn check_unrecognized_priced_product(
        &self,
        reply: &str,
        mentions: &[ProductMention<'_>],
        issues: &mut Vec<ValidationIssue>,
    ) -> Result<(), MentionError> {
        if mentions.is_empty() && first_price_in(reply)?.is_some() {
            issues.push(ValidationIssue::new(
                IssueKind::UnknownProduct,
                IssueSeverity::High,
                "reply quotes a price for a product not in the catalog",
            ));
        }
        Ok(())
    }

    fn check_overclaims(&self, normalized_reply: &str, issues: &mut Vec<ValidationIssue>) {
        for phrase in OVERCLAIM_PHRASES {
            if contains_phrase(normalized_reply, phrase) {
                issues.push(ValidationIssue::new(
                    IssueKind::OverClaim,
                    IssueSeverity::High,
                    format!("reply claims '{phrase}'"),
                ));
            }
        }
    }

    fn check_intent(
        &self,
        intent: MessageIntent,
        reply: &str,
        normalized_reply: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Result<(), MentionError> {
        match intent {
            MessageIntent::PriceInquiry => {
                if first_price_in(reply)?.is_none() {
                    issues.push(ValidationIssue::new(
                        IssueKind::IntentMismatch,
                        IssueSeverity::Medium,
                        "customer asked for a price, reply states none",
                    ));
                }
            }
            MessageIntent::OrderRequest => {
                let acknowledged = ORDER_REPLY_MARKERS
                    .iter()
                    .any(|m| contains_phrase(normalized_reply, m));
                if !acknowledged {
                    issues.push(ValidationIssue::new(
                        IssueKind::IntentMismatch,
                        IssueSeverity::Medium,
                        "customer wants to order, reply does not progress the order",
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Replies that share almost no content words with the message are
    /// answering some other conversation.
    fn check_topical_overlap(
        &self,
        normalized_message: &str,
        normalized_reply: &str,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let message_words: HashSet<&str> = tokenize(normalized_message)
            .into_iter()
            .filter(|w| w.chars().count() >= CONTENT_WORD_MIN_LEN)
            .collect();
        if message_words.len() < 3 {
            return;
        }
        let reply_words: HashSet<&str> = tokenize(normalized_reply)
            .into_iter()
            .filter(|w| w.chars().count() >= CONTENT_WORD_MIN_LEN)
            .collect();
        let shared = message_words.intersection(&reply_words).count();
        let overlap = shared as f32 / message_words.len() as f32;
        if overlap < MIN_QUERY_OVERLAP {
            issues.push(ValidationIssue::new(
                IssueKind::IrrelevantResponse,
                IssueSeverity::High,
                format!("reply shares only {:.0}% of the message's content words", overlap * 100.0),
            ));
        }
    }
}

fn category_of(catalog: &[Product], product_id: &str) -> Option<ProductCategory> {
    catalog.iter().find(|p| p.id == product_id).map(|p| p.category)
}

/// Whole-word prefix match on normalized text.
fn opens_with(normalized: &str, phrase: &str) -> bool {
    match normalized.strip_prefix(phrase) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}
