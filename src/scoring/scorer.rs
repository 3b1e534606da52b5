use tracing::debug;

use crate::config::{MIN_RELEVANCE_THRESHOLD, OUT_OF_STOCK_PENALTY};
use crate::extraction::{
    ExtractedHealthData, ExtractedItem, SymptomDuration, SymptomFrequency, SymptomProgression,
};
use crate::lexicon::Severity;
use crate::models::{CustomerProfile, DosingCadence, OnsetProfile, Product, StrengthTier};
use crate::scoring::types::{
    ContextualRecommendation, ReasonKind, RecommendationReason, UrgencyLevel,
};
use crate::scoring::weights::weights_for;

/// Weight of a match found in the product's free-text benefits rather than
/// in its declared health profile.
const BENEFIT_MATCH_WEIGHT: f32 = 0.5;

/// Ranks catalog products against one turn's extracted health assessment.
///
/// Scoring is pure per product: four partials (symptom, condition, temporal,
/// severity) are combined as a weighted average using the category's weight
/// table, then scaled by profile alignment and urgency congruence, capped
/// at 1.0. The out-of-stock penalty is applied after the cap so a stocked
/// product always dominates its own out-of-stock score by a fixed factor.
#[derive(Debug, Default)]
pub struct RelevanceScorer;

impl RelevanceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score every candidate, drop the noise floor, and keep the best
    /// `limit` in descending relevance order. Ties keep catalog order.
    pub fn score_batch(
        &self,
        candidates: &[Product],
        extracted: &ExtractedHealthData,
        profile: &CustomerProfile,
        limit: usize,
    ) -> Vec<ContextualRecommendation> {
        let mut scored: Vec<ContextualRecommendation> = candidates
            .iter()
            .map(|p| self.score(p, extracted, profile))
            .filter(|r| r.relevance_score >= MIN_RELEVANCE_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        scored.truncate(limit);
        debug!(
            candidates = candidates.len(),
            kept = scored.len(),
            "scored recommendation candidates"
        );
        scored
    }

    /// Score one product. The result is always in [0,1].
    pub fn score(
        &self,
        product: &Product,
        extracted: &ExtractedHealthData,
        profile: &CustomerProfile,
    ) -> ContextualRecommendation {
        let weights = weights_for(product.category);
        let mut reasons = Vec::new();

        let symptom = self.term_partial(
            product,
            &extracted.symptoms,
            ReasonKind::SymptomMatch,
            &mut reasons,
        );
        let condition = self.term_partial(
            product,
            &extracted.conditions,
            ReasonKind::ConditionMatch,
            &mut reasons,
        );
        let temporal = self.temporal_partial(product, extracted, &mut reasons);
        let severity = self.severity_partial(product, extracted, &mut reasons);

        let weight_sum = weights.symptom_match
            + weights.condition_match
            + weights.duration_bonus
            + weights.severity_multiplier;
        let base = (symptom * weights.symptom_match
            + condition * weights.condition_match
            + temporal * weights.duration_bonus
            + severity * weights.severity_multiplier)
            / weight_sum;

        let urgency = derive_urgency(extracted);

        let alignment = profile.alignment_with(product);
        if alignment > 0.0 {
            reasons.push(RecommendationReason {
                kind: ReasonKind::ProfileFit,
                explanation: "cocok dengan profil pelanggan".into(),
                confidence: alignment,
                evidence: product.suitable_for.join(", "),
            });
        }
        let urgency_congruence =
            if urgency >= UrgencyLevel::Soon && product_onset(product) == Some(OnsetProfile::FastActing) {
                1.0
            } else {
                0.0
            };

        let multiplier = 1.0
            + alignment * weights.user_profile_alignment
            + urgency_congruence * weights.contextual_relevance;

        let mut score = (base * multiplier).min(1.0);
        if !product.in_stock {
            score *= OUT_OF_STOCK_PENALTY;
        }

        ContextualRecommendation {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            relevance_score: score.clamp(0.0, 1.0),
            reasons,
            urgency,
        }
    }

    /// Average per-item match strength against the product's targeted terms
    /// (full weight) or benefits text (half weight), clamped to [0,1].
    fn term_partial(
        &self,
        product: &Product,
        items: &[ExtractedItem],
        kind: ReasonKind,
        reasons: &mut Vec<RecommendationReason>,
    ) -> f32 {
        if items.is_empty() {
            return 0.0;
        }
        let targeted: Vec<&str> = match (&product.health, kind) {
            (Some(h), ReasonKind::SymptomMatch) => {
                h.targeted_symptoms().iter().map(String::as_str).collect()
            }
            (Some(h), _) => h.targeted_conditions().iter().map(String::as_str).collect(),
            (None, _) => Vec::new(),
        };

        let mut total = 0.0;
        for item in items {
            let needles: Vec<String> = std::iter::once(item.term.clone())
                .chain(item.mapped_terms.iter().cloned())
                .map(|t| t.to_lowercase())
                .collect();

            let direct = targeted
                .iter()
                .any(|t| needles.iter().any(|n| terms_overlap(n, t)));
            let via_benefits = !direct
                && product.benefits.iter().any(|b| {
                    let b = b.to_lowercase();
                    needles.iter().any(|n| terms_overlap(n, &b))
                });

            let match_weight = if direct {
                1.0
            } else if via_benefits {
                BENEFIT_MATCH_WEIGHT
            } else {
                continue;
            };

            let contribution =
                (item.confidence * severity_bonus(item.severity) * match_weight).min(1.0);
            total += contribution;
            reasons.push(RecommendationReason {
                kind,
                explanation: format!("membantu keluhan {}", item.term),
                confidence: contribution,
                evidence: item.term.clone(),
            });
        }
        (total / items.len() as f32).min(1.0)
    }

    /// Congruence between the complaint's time course and the product's
    /// onset/dosing profile. Neutral 0.5 when neither side says anything.
    fn temporal_partial(
        &self,
        product: &Product,
        extracted: &ExtractedHealthData,
        reasons: &mut Vec<RecommendationReason>,
    ) -> f32 {
        let mut score = 0.5;
        let onset = product_onset(product);

        let onset_fits = matches!(
            (extracted.temporal.duration, onset),
            (SymptomDuration::Acute, Some(OnsetProfile::FastActing))
                | (SymptomDuration::Chronic, Some(OnsetProfile::SustainedSupport))
        );
        if onset_fits {
            score += 0.3;
            reasons.push(RecommendationReason {
                kind: ReasonKind::TemporalFit,
                explanation: "sesuai dengan lamanya keluhan".into(),
                confidence: 0.8,
                evidence: format!("{:?}", extracted.temporal.duration),
            });
        }
        if extracted.temporal.frequency == SymptomFrequency::Constant
            && product.health.as_ref().map(|h| h.dosing()) == Some(DosingCadence::MultipleDaily)
        {
            score += 0.2;
        }
        score
    }

    /// Congruence between assessed severity and the product's strength tier.
    fn severity_partial(
        &self,
        product: &Product,
        extracted: &ExtractedHealthData,
        reasons: &mut Vec<RecommendationReason>,
    ) -> f32 {
        let Some(health) = &product.health else {
            return 0.5;
        };
        let assessed = extracted.assessed_severity();
        let mut score = 0.5;

        let tier_fits = matches!(
            (assessed, health.strength()),
            (Severity::Mild, StrengthTier::Gentle)
                | (Severity::Moderate, StrengthTier::Standard)
                | (Severity::Severe, StrengthTier::Extra)
        );
        if tier_fits {
            score += 0.3;
        }
        if assessed == Severity::Severe && health.addresses_severe() {
            score += 0.2;
            reasons.push(RecommendationReason {
                kind: ReasonKind::SeverityFit,
                explanation: "diformulasikan untuk keluhan berat".into(),
                confidence: 0.7,
                evidence: assessed.as_str().to_string(),
            });
        }
        score
    }
}

/// Urgency of the complaint, derived from severity and trajectory.
pub fn derive_urgency(extracted: &ExtractedHealthData) -> UrgencyLevel {
    let severity = extracted.assessed_severity();
    let worsening = extracted.temporal.progression == SymptomProgression::Worsening;
    let constant = extracted.temporal.frequency == SymptomFrequency::Constant;

    match (severity, worsening, constant) {
        (Severity::Severe, true, true) => UrgencyLevel::Emergency,
        (Severity::Severe, true, _) => UrgencyLevel::Urgent,
        (Severity::Severe, _, _) => UrgencyLevel::Soon,
        (Severity::Moderate, true, _) => UrgencyLevel::Soon,
        _ => UrgencyLevel::Routine,
    }
}

fn severity_bonus(severity: Severity) -> f32 {
    match severity {
        Severity::Mild => 0.8,
        Severity::Moderate | Severity::Any => 1.0,
        Severity::Severe => 1.3,
    }
}

fn product_onset(product: &Product) -> Option<OnsetProfile> {
    product.health.as_ref().map(|h| h.onset())
}

/// Loose bidirectional containment on lowercase terms, so "kolesterol"
/// matches "kolesterol tinggi" and vice versa.
fn terms_overlap(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::TemporalContext;
    use crate::lexicon::TermKind;
    use crate::models::{MetabolicHealthProfile, ProductCategory, ProductHealthProfile};

    fn metabolic_product(id: &str, in_stock: bool) -> Product {
        Product {
            id: id.into(),
            name: format!("Produk {id}"),
            aliases: vec![],
            category: ProductCategory::Metabolic,
            price_idr: 150_000,
            in_stock,
            benefits: vec!["membantu menjaga gula darah".into()],
            warnings: vec![],
            suitable_for: vec!["lansia".into()],
            health: Some(ProductHealthProfile::Metabolic(MetabolicHealthProfile {
                targeted_symptoms: vec!["lemas".into()],
                targeted_conditions: vec!["diabetes".into(), "kolesterol".into()],
                onset: OnsetProfile::SustainedSupport,
                dosing: DosingCadence::Daily,
                strength: StrengthTier::Standard,
                addresses_severe: false,
                supports_blood_sugar: true,
                supports_cholesterol: true,
            })),
        }
    }

    fn item(term: &str, confidence: f32, severity: Severity, kind: TermKind) -> ExtractedItem {
        ExtractedItem {
            term: term.into(),
            original_text: term.into(),
            confidence,
            severity,
            kind,
            mapped_terms: vec![],
            matched_context_clues: vec![],
        }
    }

    fn diabetes_extraction() -> ExtractedHealthData {
        ExtractedHealthData {
            symptoms: vec![item("lemas", 0.8, Severity::Any, TermKind::Symptom)],
            conditions: vec![item("diabetes", 0.95, Severity::Moderate, TermKind::Condition)],
            temporal: TemporalContext::default(),
        }
    }

    // ── score bounds ─────────────────────────────────────────────────────

    #[test]
    fn score_stays_in_unit_interval() {
        let scorer = RelevanceScorer::new();
        let profile = CustomerProfile {
            known_conditions: vec!["diabetes".into()],
            tags: vec!["lansia".into()],
        };
        let mut extracted = diabetes_extraction();
        extracted.conditions[0].severity = Severity::Severe;
        extracted.temporal.duration = SymptomDuration::Chronic;
        extracted.temporal.frequency = SymptomFrequency::Constant;
        extracted.temporal.progression = SymptomProgression::Worsening;

        for in_stock in [true, false] {
            let rec = scorer.score(&metabolic_product("p1", in_stock), &extracted, &profile);
            assert!(
                (0.0..=1.0).contains(&rec.relevance_score),
                "score {} out of range",
                rec.relevance_score
            );
        }
    }

    #[test]
    fn matching_product_scores_meaningfully() {
        let scorer = RelevanceScorer::new();
        let rec = scorer.score(
            &metabolic_product("p1", true),
            &diabetes_extraction(),
            &CustomerProfile::default(),
        );
        assert!(rec.relevance_score > 0.4, "got {}", rec.relevance_score);
        assert!(rec
            .reasons
            .iter()
            .any(|r| r.kind == ReasonKind::ConditionMatch && r.evidence == "diabetes"));
    }

    // ── out-of-stock penalty ─────────────────────────────────────────────

    #[test]
    fn out_of_stock_score_is_at_most_a_tenth() {
        let scorer = RelevanceScorer::new();
        let extracted = diabetes_extraction();
        let profile = CustomerProfile::default();

        let stocked = scorer.score(&metabolic_product("p1", true), &extracted, &profile);
        let unstocked = scorer.score(&metabolic_product("p1", false), &extracted, &profile);
        assert!(unstocked.relevance_score <= stocked.relevance_score * OUT_OF_STOCK_PENALTY + 1e-6);
    }

    // ── batch behaviour ──────────────────────────────────────────────────

    #[test]
    fn batch_is_sorted_filtered_and_truncated() {
        let scorer = RelevanceScorer::new();
        let mut unrelated = metabolic_product("p3", true);
        unrelated.benefits = vec![];
        unrelated.health = None;
        unrelated.category = ProductCategory::GeneralWellness;

        let candidates = vec![
            metabolic_product("p1", false),
            metabolic_product("p2", true),
            unrelated,
        ];
        let recs = scorer.score_batch(
            &candidates,
            &diabetes_extraction(),
            &CustomerProfile::default(),
            2,
        );
        assert!(recs.len() <= 2);
        assert_eq!(recs[0].product_id, "p2");
        for pair in recs.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
        assert!(recs.iter().all(|r| r.relevance_score >= MIN_RELEVANCE_THRESHOLD));
    }

    // ── urgency derivation ───────────────────────────────────────────────

    #[test]
    fn urgency_escalates_with_severity_and_trajectory() {
        let mut extracted = diabetes_extraction();
        assert_eq!(derive_urgency(&extracted), UrgencyLevel::Routine);

        extracted.conditions[0].severity = Severity::Severe;
        assert_eq!(derive_urgency(&extracted), UrgencyLevel::Soon);

        extracted.temporal.progression = SymptomProgression::Worsening;
        assert_eq!(derive_urgency(&extracted), UrgencyLevel::Urgent);

        extracted.temporal.frequency = SymptomFrequency::Constant;
        assert_eq!(derive_urgency(&extracted), UrgencyLevel::Emergency);
    }

    #[test]
    fn urgent_complaint_boosts_fast_acting_products() {
        let scorer = RelevanceScorer::new();
        let mut extracted = diabetes_extraction();
        extracted.conditions[0].severity = Severity::Severe;
        extracted.temporal.progression = SymptomProgression::Worsening;

        let mut slow = metabolic_product("p1", true);
        let mut fast = slow.clone();
        fast.id = "p2".into();
        if let Some(ProductHealthProfile::Metabolic(ref mut h)) = fast.health {
            h.onset = OnsetProfile::FastActing;
        }
        if let Some(ProductHealthProfile::Metabolic(ref mut h)) = slow.health {
            h.onset = OnsetProfile::Balanced;
        }

        let profile = CustomerProfile::default();
        let slow_rec = scorer.score(&slow, &extracted, &profile);
        let fast_rec = scorer.score(&fast, &extracted, &profile);
        assert!(fast_rec.relevance_score > slow_rec.relevance_score);
    }
}
