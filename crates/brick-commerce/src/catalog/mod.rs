//! Product catalog module.
//!
//! The catalog is loaded once and never mutated; every other component
//! borrows products from it.

mod facets;
mod product;

pub use facets::{facet_configs, FacetConfig, FacetKey, FilterOptions};
pub use product::Product;

#[cfg(test)]
pub(crate) use product::fixtures;

use crate::error::CommerceError;

/// The 22-product reference catalog shipped with the crate.
const REFERENCE_CATALOG: &str = include_str!("data/catalog.json");

/// Default number of products returned by [`Catalog::featured`].
pub const DEFAULT_FEATURED_LIMIT: usize = 8;

/// An immutable, ordered product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products, keeping their order.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Load the reference catalog.
    pub fn reference() -> Result<Self, CommerceError> {
        Self::from_json(REFERENCE_CATALOG)
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look a product up by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look a product up by id, failing when it is missing.
    pub fn require(&self, id: &str) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Products in a category (case-insensitive).
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category.to_lowercase() == category.to_lowercase())
            .collect()
    }

    /// Products in a theme (case-insensitive).
    pub fn by_theme(&self, theme: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.theme.to_lowercase() == theme.to_lowercase())
            .collect()
    }

    /// New products, in catalog order, at most `limit`.
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_new).take(limit).collect()
    }

    /// Products on sale, optionally capped.
    pub fn on_sale(&self, limit: Option<usize>) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_on_sale)
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Distinct categories, themes, types and ages.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::collect(&self.products)
    }
}
