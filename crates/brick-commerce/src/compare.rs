//! Product comparison set.

use brick_cache::{Cache, Persisted, StorageKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Product;

/// Maximum number of products compared side by side.
pub const MAX_COMPARE_ITEMS: usize = 4;

/// Products being compared, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompareSet {
    #[serde(default)]
    pub items: Vec<Product>,
}

impl CompareSet {
    /// Append a product. Returns `false`, changing nothing, when the set
    /// is full or already holds the product.
    pub fn add(&mut self, product: &Product) -> bool {
        if !self.can_add_more() || self.contains(product.id.as_str()) {
            return false;
        }
        self.items.push(product.clone());
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    pub fn can_add_more(&self) -> bool {
        self.items.len() < MAX_COMPARE_ITEMS
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }
}

/// Persisted compare store.
#[derive(Debug)]
pub struct CompareStore {
    state: Persisted<CompareSet>,
}

impl CompareStore {
    pub fn new(cache: Cache) -> Self {
        Self {
            state: Persisted::load(cache, StorageKey::Compare),
        }
    }

    /// See [`CompareSet::add`]. Callers check the result to warn about a
    /// full set.
    pub fn add_to_compare(&mut self, product: &Product) -> bool {
        let added = self.state.update(|set| set.add(product));
        debug!(product_id = %product.id, added, "compare add");
        added
    }

    pub fn remove_from_compare(&mut self, id: &str) -> bool {
        self.state.update(|set| set.remove(id))
    }

    pub fn clear_compare(&mut self) {
        self.state.update(CompareSet::clear);
    }

    pub fn is_in_compare(&self, id: &str) -> bool {
        self.state.state().contains(id)
    }

    pub fn can_add_more(&self) -> bool {
        self.state.state().can_add_more()
    }

    pub fn items(&self) -> &[Product] {
        self.state.state().items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use brick_cache::MemoryStore;

    #[test]
    fn test_capacity() {
        let mut set = CompareSet::default();
        for i in 1..=4 {
            assert!(set.add(&product(&i.to_string(), 100, 1)));
        }
        assert!(!set.can_add_more());
        assert!(!set.add(&product("5", 100, 1)));
        assert_eq!(set.items().len(), 4);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut set = CompareSet::default();
        assert!(set.add(&product("1", 100, 1)));
        assert!(!set.add(&product("1", 100, 1)));
        assert_eq!(set.items().len(), 1);
        assert!(set.can_add_more());
    }

    #[test]
    fn test_remove_frees_a_slot() {
        let mut set = CompareSet::default();
        for i in 1..=4 {
            set.add(&product(&i.to_string(), 100, 1));
        }
        assert!(set.remove("2"));
        assert!(set.add(&product("5", 100, 1)));

        let ids: Vec<_> = set.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4", "5"]);
    }

    #[test]
    fn test_store_persists_full_products() {
        let cache = Cache::new(MemoryStore::new());
        let mut store = CompareStore::new(cache.clone());
        store.add_to_compare(&product("1", 100, 1));

        let raw: serde_json::Value = cache.get(StorageKey::Compare.as_str()).unwrap().unwrap();
        assert_eq!(raw["items"][0]["id"], "1");
        assert_eq!(raw["items"][0]["type"], "Sets");

        let reloaded = CompareStore::new(cache);
        assert!(reloaded.is_in_compare("1"));

        let mut reloaded = reloaded;
        reloaded.clear_compare();
        assert!(reloaded.items().is_empty());
    }
}
