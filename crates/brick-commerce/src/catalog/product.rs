//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Field names on the wire match the storefront's product documents, so
/// products can be embedded verbatim in persisted compare and
/// recently-viewed lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current price.
    pub price: Money,
    /// Price before the sale; present only when on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Shown with a "new" badge.
    pub is_new: bool,
    /// Shown with a "sale" badge.
    pub is_on_sale: bool,
    /// Average rating, 0 to 5.
    pub rating: f64,
    /// Category slug (e.g. "helmet", "cars").
    pub category: String,
    /// Product type facet (e.g. "Sets").
    #[serde(rename = "type")]
    pub product_type: String,
    /// Age rating facet (e.g. "18+").
    pub age: String,
    /// Theme facet (e.g. "Star Wars").
    pub theme: String,
    /// Interests facet; a product can have several.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Piece-count bucket facet (e.g. "501-1000").
    pub pieces: String,
    /// Highlight facet (e.g. "Exclusivos").
    pub highlight: String,
    /// Primary image URL.
    pub img: String,
    /// Hover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_secondary: Option<String>,
    /// Gallery, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Units available.
    pub stock: u32,
    /// One-line description for cards.
    #[serde(default)]
    pub short_description: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Check if any units are available.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Rounded discount percentage against `original_price`.
    pub fn discount_percent(&self) -> Option<u32> {
        self.original_price
            .and_then(|original| self.price.percent_off(original))
    }

    /// Gallery images, falling back to the primary image when the gallery
    /// is empty.
    pub fn gallery(&self) -> Vec<&str> {
        if self.images.is_empty() {
            vec![self.img.as_str()]
        } else {
            self.images.iter().map(String::as_str).collect()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::product;
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let json = r#"{
            "id": "1",
            "name": "Captain Rex Helmet",
            "price": 899,
            "originalPrice": 999,
            "isNew": true,
            "isOnSale": true,
            "rating": 4.8,
            "category": "helmet",
            "type": "Sets",
            "age": "18+",
            "theme": "Star Wars",
            "interests": ["Arte", "Robots"],
            "pieces": "501-1000",
            "highlight": "Edición Limitada",
            "img": "a.png",
            "imageSecondary": "b.png",
            "images": ["a.png", "b.png"],
            "stock": 10,
            "shortDescription": "short",
            "description": "long"
        }"#;

        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "1");
        assert_eq!(p.product_type, "Sets");
        assert_eq!(p.original_price, Some(Money::new(999)));
        assert_eq!(p.discount_percent(), Some(10));

        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["type"], "Sets");
        assert_eq!(value["imageSecondary"], "b.png");
        assert_eq!(value["isOnSale"], true);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let p = product("2", 649, 10);
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("originalPrice").is_none());
        assert!(value.get("imageSecondary").is_none());
        assert_eq!(p.discount_percent(), None);
    }

    #[test]
    fn test_gallery_fallback() {
        let mut p = product("3", 100, 1);
        p.images.clear();
        assert_eq!(p.gallery(), vec!["https://example.com/3.png"]);
        assert!(p.is_in_stock());
    }
}
