//! Sorting and the listing query builder.

use crate::catalog::Product;
use crate::search::text::collation_key;
use crate::search::{filter_by_criteria, paginate, search, Page, ProductFilters, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Recommended,
    /// Sort by price, low to high.
    PriceLowHigh,
    /// Sort by price, high to low.
    PriceHighLow,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Recommended,
        SortOption::PriceLowHigh,
        SortOption::PriceHighLow,
        SortOption::NameAsc,
        SortOption::NameDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Recommended => "recommended",
            SortOption::PriceLowHigh => "price_low_high",
            SortOption::PriceHighLow => "price_high_low",
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Recommended => "Recomendados",
            SortOption::PriceLowHigh => "Precio: menor a mayor",
            SortOption::PriceHighLow => "Precio: mayor a menor",
            SortOption::NameAsc => "Nombre: A-Z",
            SortOption::NameDesc => "Nombre: Z-A",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn compare_names(a: &Product, b: &Product) -> Ordering {
    collation_key(&a.name)
        .cmp(&collation_key(&b.name))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort products. The sort is stable: ties keep their incoming order.
pub fn sort_by<'a, I>(products: I, option: SortOption) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut sorted: Vec<&'a Product> = products.into_iter().collect();
    match option {
        SortOption::Recommended => {}
        SortOption::PriceLowHigh => sorted.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceHighLow => sorted.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::NameAsc => sorted.sort_by(|a, b| compare_names(a, b)),
        SortOption::NameDesc => sorted.sort_by(|a, b| compare_names(b, a)),
    }
    sorted
}

/// A product listing query.
///
/// Steps run in a fixed order: category, theme, text search, facets,
/// sort, then pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub theme: Option<String>,
    pub search: Option<String>,
    pub filters: ProductFilters,
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: usize,
    pub per_page: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    pub fn new() -> Self {
        Self {
            category: None,
            theme: None,
            search: None,
            filters: ProductFilters::default(),
            sort: SortOption::Recommended,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    /// Restrict to a category (case-insensitive).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to a theme (case-insensitive).
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Set the text query. Blank queries are ignored.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        if !q.trim().is_empty() {
            self.search = Some(q);
        }
        self
    }

    pub fn with_filters(mut self, filters: ProductFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_pagination(mut self, page: usize, per_page: usize) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    /// Run the query against a product list.
    pub fn execute<'a>(&self, products: &'a [Product]) -> Page<'a> {
        let mut matched: Vec<&'a Product> = products
            .iter()
            .filter(|p| {
                self.category
                    .as_ref()
                    .map_or(true, |c| p.category.to_lowercase() == c.to_lowercase())
            })
            .filter(|p| {
                self.theme
                    .as_ref()
                    .map_or(true, |t| p.theme.to_lowercase() == t.to_lowercase())
            })
            .collect();

        if let Some(q) = &self.search {
            matched = search(matched, q);
        }
        let matched = filter_by_criteria(matched, &self.filters);
        let sorted = sort_by(matched, self.sort);

        paginate(sorted, self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use crate::catalog::FacetKey;

    fn ids<'a>(products: &[&'a Product]) -> Vec<&'a str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn named(id: &str, name: &str, price: i64) -> Product {
        let mut p = product(id, price, 1);
        p.name = name.to_string();
        p
    }

    #[test]
    fn test_sort_option_wire_names() {
        assert_eq!(
            serde_json::to_string(&SortOption::PriceLowHigh).unwrap(),
            "\"price_low_high\""
        );
        assert_eq!(SortOption::from_str("name_desc"), Some(SortOption::NameDesc));
        assert_eq!(SortOption::from_str("rating"), None);
        assert_eq!(SortOption::default(), SortOption::Recommended);
    }

    #[test]
    fn test_sort_by_price_is_stable() {
        let products = vec![
            named("1", "A", 300),
            named("2", "B", 100),
            named("3", "C", 300),
            named("4", "D", 100),
        ];

        let low = sort_by(&products, SortOption::PriceLowHigh);
        assert_eq!(ids(&low), vec!["2", "4", "1", "3"]);

        let high = sort_by(&products, SortOption::PriceHighLow);
        assert_eq!(ids(&high), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_recommended_keeps_catalog_order() {
        let products = vec![named("3", "C", 1), named("1", "A", 3), named("2", "B", 2)];
        let sorted = sort_by(&products, SortOption::Recommended);
        assert_eq!(ids(&sorted), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_sort_by_name_folds_case_and_accents() {
        let products = vec![
            named("1", "taj Mahal", 1),
            named("2", "Ávila", 1),
            named("3", "Batmobile", 1),
            named("4", "zombie", 1),
        ];

        let asc = sort_by(&products, SortOption::NameAsc);
        assert_eq!(ids(&asc), vec!["2", "3", "1", "4"]);

        let desc = sort_by(&products, SortOption::NameDesc);
        assert_eq!(ids(&desc), vec!["4", "1", "3", "2"]);
    }

    #[test]
    fn test_query_defaults() {
        let query = ProductQuery::new();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 9);
        assert_eq!(query.sort, SortOption::Recommended);
        assert!(query.with_search("   ").search.is_none());
    }

    #[test]
    fn test_query_pipeline() {
        let mut a = named("1", "Red Car", 500);
        a.category = "cars".into();
        a.theme = "Technic".into();
        let mut b = named("2", "Blue Car", 300);
        b.category = "cars".into();
        b.theme = "Technic".into();
        let mut c = named("3", "Green Car", 100);
        c.category = "cars".into();
        c.theme = "Marvel".into();
        let d = named("4", "Helmet", 50);

        let products = vec![a, b, c, d];
        let page = ProductQuery::new()
            .with_category("CARS")
            .with_search("car")
            .with_filters(ProductFilters::new().with(FacetKey::Theme, ["Technic"]))
            .with_sort(SortOption::PriceLowHigh)
            .execute(&products);

        assert_eq!(ids(&page.products), vec!["2", "1"]);
        assert_eq!(page.total(), 2);
    }

    #[test]
    fn test_query_paginates_after_sorting() {
        let products: Vec<_> = (1..=5)
            .map(|i| named(&i.to_string(), "X", 10 - i as i64))
            .collect();

        let page = ProductQuery::new()
            .with_sort(SortOption::PriceLowHigh)
            .with_pagination(2, 2)
            .execute(&products);

        assert_eq!(ids(&page.products), vec!["3", "2"]);
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }
}
