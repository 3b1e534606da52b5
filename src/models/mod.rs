//! Domain model: products, their health capability profiles, and customers.
//!
//! Product health metadata is an explicit tagged union selected by category,
//! so the scorer can pattern-match exhaustively instead of probing an
//! untyped metadata bag.

pub mod catalog;

use serde::{Deserialize, Serialize};

pub use catalog::{InMemoryProductCatalog, ProductCatalog};

// ---------------------------------------------------------------------------
// ProductCategory
// ---------------------------------------------------------------------------

/// Commercial category of a catalog product. Selects the scoring weight
/// table and the shape of the health profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Digestive,
    Metabolic,
    Immune,
    Relief,
    GeneralWellness,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Digestive => "digestive",
            Self::Metabolic => "metabolic",
            Self::Immune => "immune",
            Self::Relief => "relief",
            Self::GeneralWellness => "general_wellness",
        }
    }
}

// ---------------------------------------------------------------------------
// Health profile building blocks
// ---------------------------------------------------------------------------

/// How fast the product is expected to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnsetProfile {
    /// Relief within hours; congruent with acute complaints.
    FastActing,
    /// Builds effect over weeks; congruent with chronic complaints.
    SustainedSupport,
    Balanced,
}

/// Declared dosing cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DosingCadence {
    SingleDose,
    Daily,
    MultipleDaily,
}

/// Declared strength tier, matched against assessed complaint severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTier {
    Gentle,
    Standard,
    Extra,
}

// ---------------------------------------------------------------------------
// Per-category capability profiles
// ---------------------------------------------------------------------------

/// Capability profile for digestive products (stomach, bowel, reflux).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestiveHealthProfile {
    pub targeted_symptoms: Vec<String>,
    pub targeted_conditions: Vec<String>,
    pub onset: OnsetProfile,
    pub dosing: DosingCadence,
    pub strength: StrengthTier,
    /// Warnings text explicitly addresses severe presentations.
    pub addresses_severe: bool,
    /// Gentle enough for sensitive stomachs / reflux-prone customers.
    pub reflux_safe: bool,
}

/// Capability profile for metabolic products (blood sugar, cholesterol, gout).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetabolicHealthProfile {
    pub targeted_symptoms: Vec<String>,
    pub targeted_conditions: Vec<String>,
    pub onset: OnsetProfile,
    pub dosing: DosingCadence,
    pub strength: StrengthTier,
    pub addresses_severe: bool,
    pub supports_blood_sugar: bool,
    pub supports_cholesterol: bool,
}

/// Capability profile for immune products (cough, flu, fever support).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImmuneHealthProfile {
    pub targeted_symptoms: Vec<String>,
    pub targeted_conditions: Vec<String>,
    pub onset: OnsetProfile,
    pub dosing: DosingCadence,
    pub strength: StrengthTier,
    pub addresses_severe: bool,
}

/// Capability profile for symptomatic-relief products (pain, sleep, fatigue).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliefHealthProfile {
    pub targeted_symptoms: Vec<String>,
    pub targeted_conditions: Vec<String>,
    pub onset: OnsetProfile,
    pub dosing: DosingCadence,
    pub strength: StrengthTier,
    pub addresses_severe: bool,
}

/// Capability profile for general-wellness products (multivitamins, superfoods).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralWellnessProfile {
    pub targeted_symptoms: Vec<String>,
    pub targeted_conditions: Vec<String>,
    pub onset: OnsetProfile,
    pub dosing: DosingCadence,
    pub strength: StrengthTier,
}

/// Tagged union over the per-category capability profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductHealthProfile {
    Digestive(DigestiveHealthProfile),
    Metabolic(MetabolicHealthProfile),
    Immune(ImmuneHealthProfile),
    Relief(ReliefHealthProfile),
    General(GeneralWellnessProfile),
}

impl ProductHealthProfile {
    pub fn targeted_symptoms(&self) -> &[String] {
        match self {
            Self::Digestive(p) => &p.targeted_symptoms,
            Self::Metabolic(p) => &p.targeted_symptoms,
            Self::Immune(p) => &p.targeted_symptoms,
            Self::Relief(p) => &p.targeted_symptoms,
            Self::General(p) => &p.targeted_symptoms,
        }
    }

    pub fn targeted_conditions(&self) -> &[String] {
        match self {
            Self::Digestive(p) => &p.targeted_conditions,
            Self::Metabolic(p) => &p.targeted_conditions,
            Self::Immune(p) => &p.targeted_conditions,
            Self::Relief(p) => &p.targeted_conditions,
            Self::General(p) => &p.targeted_conditions,
        }
    }

    pub fn onset(&self) -> OnsetProfile {
        match self {
            Self::Digestive(p) => p.onset,
            Self::Metabolic(p) => p.onset,
            Self::Immune(p) => p.onset,
            Self::Relief(p) => p.onset,
            Self::General(p) => p.onset,
        }
    }

    pub fn dosing(&self) -> DosingCadence {
        match self {
            Self::Digestive(p) => p.dosing,
            Self::Metabolic(p) => p.dosing,
            Self::Immune(p) => p.dosing,
            Self::Relief(p) => p.dosing,
            Self::General(p) => p.dosing,
        }
    }

    pub fn strength(&self) -> StrengthTier {
        match self {
            Self::Digestive(p) => p.strength,
            Self::Metabolic(p) => p.strength,
            Self::Immune(p) => p.strength,
            Self::Relief(p) => p.strength,
            Self::General(p) => p.strength,
        }
    }

    /// Whether the product's warnings explicitly address severe presentations.
    /// General-wellness products never do.
    pub fn addresses_severe(&self) -> bool {
        match self {
            Self::Digestive(p) => p.addresses_severe,
            Self::Metabolic(p) => p.addresses_severe,
            Self::Immune(p) => p.addresses_severe,
            Self::Relief(p) => p.addresses_severe,
            Self::General(_) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// One catalog product. `health` is optional: a product without health
/// metadata simply scores zero on the symptom/condition partials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Colloquial names and spellings customers use for this product.
    pub aliases: Vec<String>,
    pub category: ProductCategory,
    pub price_idr: u64,
    pub in_stock: bool,
    pub benefits: Vec<String>,
    pub warnings: Vec<String>,
    /// Suitability tags ("lansia", "ibu hamil", "vegetarian", ...).
    pub suitable_for: Vec<String>,
    pub health: Option<ProductHealthProfile>,
}

impl Product {
    /// All names this product answers to, lowercase.
    pub fn known_names(&self) -> Vec<String> {
        let mut names = vec![self.name.to_lowercase()];
        names.extend(self.aliases.iter().map(|a| a.to_lowercase()));
        names
    }
}

// ---------------------------------------------------------------------------
// CustomerProfile
// ---------------------------------------------------------------------------

/// What we know about the customer, accumulated across turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Conditions the customer has mentioned in past turns.
    pub known_conditions: Vec<String>,
    /// Suitability tags that apply to this customer.
    pub tags: Vec<String>,
}

impl CustomerProfile {
    /// Fraction of the product's suitability tags that match this customer,
    /// in [0,1]. No tags on either side means no alignment signal.
    pub fn alignment_with(&self, product: &Product) -> f32 {
        if self.tags.is_empty() || product.suitable_for.is_empty() {
            return 0.0;
        }
        let matched = product
            .suitable_for
            .iter()
            .filter(|t| {
                self.tags
                    .iter()
                    .any(|mine| mine.eq_ignore_ascii_case(t))
            })
            .count();
        matched as f32 / product.suitable_for.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_tags(tags: &[&str]) -> Product {
        Product {
            id: "p1".into(),
            name: "Test".into(),
            aliases: vec![],
            category: ProductCategory::GeneralWellness,
            price_idr: 100_000,
            in_stock: true,
            benefits: vec![],
            warnings: vec![],
            suitable_for: tags.iter().map(|t| t.to_string()).collect(),
            health: None,
        }
    }

    #[test]
    fn alignment_full_match() {
        let profile = CustomerProfile {
            known_conditions: vec![],
            tags: vec!["lansia".into()],
        };
        let product = product_with_tags(&["lansia"]);
        assert_eq!(profile.alignment_with(&product), 1.0);
    }

    #[test]
    fn alignment_no_tags_is_zero() {
        let profile = CustomerProfile::default();
        let product = product_with_tags(&["lansia"]);
        assert_eq!(profile.alignment_with(&product), 0.0);
    }

    #[test]
    fn general_profile_never_addresses_severe() {
        let health = ProductHealthProfile::General(GeneralWellnessProfile {
            targeted_symptoms: vec![],
            targeted_conditions: vec![],
            onset: OnsetProfile::Balanced,
            dosing: DosingCadence::Daily,
            strength: StrengthTier::Standard,
        });
        assert!(!health.addresses_severe());
    }

    #[test]
    fn known_names_include_aliases_lowercased() {
        let mut product = product_with_tags(&[]);
        product.name = "Superfood Cokelat".into();
        product.aliases = vec!["SF Cokelat".into()];
        let names = product.known_names();
        assert!(names.contains(&"superfood cokelat".to_string()));
        assert!(names.contains(&"sf cokelat".to_string()));
    }
}
