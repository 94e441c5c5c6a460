//! Filterable product facets.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named filterable product attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKey {
    Type,
    Age,
    Theme,
    Interests,
    Pieces,
    Highlight,
}

impl FacetKey {
    /// All facets, in sidebar order.
    pub const ALL: [FacetKey; 6] = [
        FacetKey::Type,
        FacetKey::Age,
        FacetKey::Theme,
        FacetKey::Interests,
        FacetKey::Pieces,
        FacetKey::Highlight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetKey::Type => "type",
            FacetKey::Age => "age",
            FacetKey::Theme => "theme",
            FacetKey::Interests => "interests",
            FacetKey::Pieces => "pieces",
            FacetKey::Highlight => "highlight",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
    }

    /// Whether a product may carry several values for this facet.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, FacetKey::Interests)
    }

    /// The product's values for this facet.
    pub fn values_of<'a>(&self, product: &'a Product) -> Vec<&'a str> {
        match self {
            FacetKey::Type => vec![product.product_type.as_str()],
            FacetKey::Age => vec![product.age.as_str()],
            FacetKey::Theme => vec![product.theme.as_str()],
            FacetKey::Interests => product.interests.iter().map(String::as_str).collect(),
            FacetKey::Pieces => vec![product.pieces.as_str()],
            FacetKey::Highlight => vec![product.highlight.as_str()],
        }
    }
}

impl fmt::Display for FacetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sidebar configuration for one facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacetConfig {
    pub key: FacetKey,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

/// The facet sidebar of the reference store.
pub fn facet_configs() -> [FacetConfig; 6] {
    [
        FacetConfig {
            key: FacetKey::Type,
            label: "Tipo de Producto",
            options: &["Sets", "Decoración del hogar"],
        },
        FacetConfig {
            key: FacetKey::Age,
            label: "Edad",
            options: &["12+", "16+", "18+"],
        },
        FacetConfig {
            key: FacetKey::Theme,
            label: "Tema",
            options: &[
                "Architecture",
                "Star Wars",
                "Technic",
                "Harry Potter",
                "Marvel",
                "Disney",
            ],
        },
        FacetConfig {
            key: FacetKey::Interests,
            label: "Intereses",
            options: &["Edificios", "Vehículos", "Arte", "Robots", "Deportes"],
        },
        FacetConfig {
            key: FacetKey::Pieces,
            label: "Número de Piezas",
            options: &["0-500", "501-1000", "1001-2000", "2001+"],
        },
        FacetConfig {
            key: FacetKey::Highlight,
            label: "Destacados",
            options: &["Exclusivos", "Destacados", "Edición Limitada"],
        },
    ]
}

/// Distinct attribute values present in a catalog, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub themes: Vec<String>,
    pub types: Vec<String>,
    pub ages: Vec<String>,
}

impl FilterOptions {
    /// Collect the options from a product list.
    pub fn collect(products: &[Product]) -> Self {
        fn push_unique(list: &mut Vec<String>, value: &str) {
            if !list.iter().any(|v| v == value) {
                list.push(value.to_string());
            }
        }

        let mut options = FilterOptions::default();
        for p in products {
            push_unique(&mut options.categories, &p.category);
            push_unique(&mut options.themes, &p.theme);
            push_unique(&mut options.types, &p.product_type);
            push_unique(&mut options.ages, &p.age);
        }
        options
    }
}
