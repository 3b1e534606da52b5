//! Product catalog seam.
//!
//! The concrete catalog (SQL, HTTP, cache) lives outside this crate; the
//! pipeline only needs candidate listing by search term. An in-memory
//! implementation is provided for tests and small deployments.

use super::Product;

/// Read-only catalog access used by the scorer and validator.
pub trait ProductCatalog {
    /// Products whose name, aliases, benefits, or targeted terms overlap
    /// the given search terms. Terms are matched case-insensitively.
    fn list_candidates(&self, search_terms: &[String]) -> Vec<Product>;

    /// Full catalog snapshot, used for mention extraction and as the
    /// candidate set when a message carries no health signal.
    fn all(&self) -> Vec<Product>;
}

/// In-memory catalog over a fixed product list.
pub struct InMemoryProductCatalog {
    products: Vec<Product>,
}

impl InMemoryProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn list_candidates(&self, search_terms: &[String]) -> Vec<Product> {
        if search_terms.is_empty() {
            return self.products.clone();
        }
        let terms: Vec<String> = search_terms.iter().map(|t| t.to_lowercase()).collect();
        self.products
            .iter()
            .filter(|p| product_matches_any(p, &terms))
            .cloned()
            .collect()
    }

    fn all(&self) -> Vec<Product> {
        self.products.clone()
    }
}

fn product_matches_any(product: &Product, terms: &[String]) -> bool {
    let mut haystack: Vec<String> = product.known_names();
    haystack.extend(product.benefits.iter().map(|b| b.to_lowercase()));
    if let Some(health) = &product.health {
        haystack.extend(health.targeted_symptoms().iter().map(|s| s.to_lowercase()));
        haystack.extend(health.targeted_conditions().iter().map(|c| c.to_lowercase()));
    }
    terms
        .iter()
        .any(|t| haystack.iter().any(|h| h.contains(t.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        MetabolicHealthProfile, DosingCadence, OnsetProfile, ProductCategory,
        ProductHealthProfile, StrengthTier,
    };

    fn metabolic_product(id: &str, name: &str, conditions: &[&str]) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            aliases: vec![],
            category: ProductCategory::Metabolic,
            price_idr: 150_000,
            in_stock: true,
            benefits: vec!["membantu menjaga gula darah".into()],
            warnings: vec![],
            suitable_for: vec![],
            health: Some(ProductHealthProfile::Metabolic(MetabolicHealthProfile {
                targeted_symptoms: vec![],
                targeted_conditions: conditions.iter().map(|c| c.to_string()).collect(),
                onset: OnsetProfile::SustainedSupport,
                dosing: DosingCadence::Daily,
                strength: StrengthTier::Standard,
                addresses_severe: false,
                supports_blood_sugar: true,
                supports_cholesterol: false,
            })),
        }
    }

    #[test]
    fn candidates_match_targeted_condition() {
        let catalog = InMemoryProductCatalog::new(vec![
            metabolic_product("p1", "Gula Balance", &["diabetes"]),
            metabolic_product("p2", "Kolesterol Care", &["kolesterol"]),
        ]);
        let found = catalog.list_candidates(&["diabetes".into()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p1");
    }

    #[test]
    fn empty_terms_return_everything() {
        let catalog = InMemoryProductCatalog::new(vec![
            metabolic_product("p1", "Gula Balance", &["diabetes"]),
        ]);
        assert_eq!(catalog.list_candidates(&[]).len(), 1);
    }

    #[test]
    fn candidates_match_product_name() {
        let catalog = InMemoryProductCatalog::new(vec![
            metabolic_product("p1", "Gula Balance", &["diabetes"]),
        ]);
        let found = catalog.list_candidates(&["gula balance".into()]);
        assert_eq!(found.len(), 1);
    }
}
