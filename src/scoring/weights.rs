use crate::models::ProductCategory;

/// Per-category weighting applied by the scorer. The first four fields
/// weight the four scoring partials (weighted average, so the base score
/// stays in [0,1]); the last two scale the multiplicative adjustments.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub symptom_match: f32,
    pub condition_match: f32,
    pub severity_multiplier: f32,
    pub duration_bonus: f32,
    pub contextual_relevance: f32,
    pub user_profile_alignment: f32,
}

/// Weight profile for a product category. Metabolic and immune products
/// lean on condition history; relief products lean on acute symptoms.
pub fn weights_for(category: ProductCategory) -> ScoringWeights {
    match category {
        ProductCategory::Digestive => ScoringWeights {
            symptom_match: 1.2,
            condition_match: 0.9,
            severity_multiplier: 1.0,
            duration_bonus: 0.9,
            contextual_relevance: 0.3,
            user_profile_alignment: 0.2,
        },
        ProductCategory::Metabolic => ScoringWeights {
            symptom_match: 0.8,
            condition_match: 1.2,
            severity_multiplier: 0.9,
            duration_bonus: 1.0,
            contextual_relevance: 0.3,
            user_profile_alignment: 0.2,
        },
        ProductCategory::Immune => ScoringWeights {
            symptom_match: 0.9,
            condition_match: 1.1,
            severity_multiplier: 0.9,
            duration_bonus: 1.0,
            contextual_relevance: 0.2,
            user_profile_alignment: 0.3,
        },
        ProductCategory::Relief => ScoringWeights {
            symptom_match: 1.3,
            condition_match: 0.7,
            severity_multiplier: 1.1,
            duration_bonus: 0.9,
            contextual_relevance: 0.4,
            user_profile_alignment: 0.1,
        },
        ProductCategory::GeneralWellness => ScoringWeights {
            symptom_match: 1.0,
            condition_match: 1.0,
            severity_multiplier: 1.0,
            duration_bonus: 1.0,
            contextual_relevance: 0.2,
            user_profile_alignment: 0.3,
        },
    }
}
