//! Facet filters.

use crate::catalog::{FacetKey, Product};
use serde::{Deserialize, Serialize};

/// Accepted values per facet.
///
/// An empty list leaves that facet unconstrained. Facets are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilters {
    #[serde(rename = "type")]
    pub product_type: Vec<String>,
    pub age: Vec<String>,
    pub theme: Vec<String>,
    pub interests: Vec<String>,
    pub pieces: Vec<String>,
    pub highlight: Vec<String>,
}

impl ProductFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted values for a facet.
    pub fn values(&self, key: FacetKey) -> &[String] {
        match key {
            FacetKey::Type => &self.product_type,
            FacetKey::Age => &self.age,
            FacetKey::Theme => &self.theme,
            FacetKey::Interests => &self.interests,
            FacetKey::Pieces => &self.pieces,
            FacetKey::Highlight => &self.highlight,
        }
    }

    fn values_mut(&mut self, key: FacetKey) -> &mut Vec<String> {
        match key {
            FacetKey::Type => &mut self.product_type,
            FacetKey::Age => &mut self.age,
            FacetKey::Theme => &mut self.theme,
            FacetKey::Interests => &mut self.interests,
            FacetKey::Pieces => &mut self.pieces,
            FacetKey::Highlight => &mut self.highlight,
        }
    }

    /// Replace the accepted values for a facet.
    pub fn set<I, S>(&mut self, key: FacetKey, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.values_mut(key) = values.into_iter().map(Into::into).collect();
    }

    /// Builder form of [`set`](Self::set).
    pub fn with<I, S>(mut self, key: FacetKey, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(key, values);
        self
    }

    /// Toggle one value on or off, the way a sidebar checkbox does.
    pub fn toggle(&mut self, key: FacetKey, value: &str) {
        let values = self.values_mut(key);
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
        } else {
            values.push(value.to_string());
        }
    }

    /// Drop every constraint.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of selected values across all facets.
    pub fn active_count(&self) -> usize {
        FacetKey::ALL.iter().map(|k| self.values(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Check a product against every active facet.
    pub fn matches(&self, product: &Product) -> bool {
        FacetKey::ALL.iter().all(|key| {
            let accepted = self.values(*key);
            if accepted.is_empty() {
                return true;
            }
            key.values_of(product)
                .iter()
                .any(|value| accepted.iter().any(|a| a == value))
        })
    }
}

/// Keep the products matching `filters`, in their original order.
pub fn filter_by_criteria<'a, I>(products: I, filters: &ProductFilters) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products.into_iter().filter(|p| filters.matches(p)).collect()
}
