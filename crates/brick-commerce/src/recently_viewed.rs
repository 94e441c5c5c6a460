//! Recently viewed products.

use brick_cache::{Cache, Persisted, StorageKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Product;

/// Maximum history length.
pub const MAX_RECENTLY_VIEWED: usize = 10;

/// View history, most recent first, without duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecentlyViewed {
    #[serde(default)]
    pub items: Vec<Product>,
}

impl RecentlyViewed {
    /// Record a view: drop any earlier entry for the product, put it in
    /// front, then cap the list.
    pub fn add(&mut self, product: &Product) {
        self.items.retain(|p| p.id != product.id);
        self.items.insert(0, product.clone());
        self.items.truncate(MAX_RECENTLY_VIEWED);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }
}

/// Persisted recently-viewed store.
#[derive(Debug)]
pub struct RecentlyViewedStore {
    state: Persisted<RecentlyViewed>,
}

impl RecentlyViewedStore {
    pub fn new(cache: Cache) -> Self {
        Self {
            state: Persisted::load(cache, StorageKey::RecentlyViewed),
        }
    }

    pub fn add_item(&mut self, product: &Product) {
        self.state.update(|list| list.add(product));
        debug!(product_id = %product.id, "recently viewed");
    }

    pub fn clear_all(&mut self) {
        self.state.update(RecentlyViewed::clear);
    }

    /// History, most recent first.
    pub fn get_items(&self) -> &[Product] {
        self.state.state().items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use brick_cache::MemoryStore;

    fn ids(list: &RecentlyViewed) -> Vec<&str> {
        list.items().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_most_recent_first() {
        let mut list = RecentlyViewed::default();
        list.add(&product("A", 1, 1));
        list.add(&product("B", 1, 1));
        assert_eq!(ids(&list), vec!["B", "A"]);
    }

    #[test]
    fn test_readd_moves_to_front() {
        let mut list = RecentlyViewed::default();
        list.add(&product("A", 1, 1));
        list.add(&product("B", 1, 1));
        list.add(&product("A", 1, 1));
        assert_eq!(ids(&list), vec!["A", "B"]);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut list = RecentlyViewed::default();
        for i in 1..=12 {
            list.add(&product(&i.to_string(), 1, 1));
        }
        assert_eq!(
            ids(&list),
            vec!["12", "11", "10", "9", "8", "7", "6", "5", "4", "3"]
        );
    }

    #[test]
    fn test_readd_at_capacity_keeps_everything_else() {
        let mut list = RecentlyViewed::default();
        for i in 1..=10 {
            list.add(&product(&i.to_string(), 1, 1));
        }
        list.add(&product("1", 1, 1));
        assert_eq!(list.items().len(), 10);
        assert_eq!(ids(&list)[0], "1");
        assert_eq!(ids(&list)[9], "2");
    }

    #[test]
    fn test_store_round_trip() {
        let cache = Cache::new(MemoryStore::new());
        let mut store = RecentlyViewedStore::new(cache.clone());
        store.add_item(&product("1", 1, 1));
        store.add_item(&product("2", 1, 1));

        let mut reloaded = RecentlyViewedStore::new(cache);
        assert_eq!(reloaded.get_items()[0].id, "2");

        reloaded.clear_all();
        assert!(reloaded.get_items().is_empty());
    }
}
