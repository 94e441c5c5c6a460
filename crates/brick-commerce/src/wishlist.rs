//! Wishlist.

use brick_cache::{Cache, Persisted, StorageKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// A saved product snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistEntry {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub stock: u32,
    pub category: String,
}

impl From<&Product> for WishlistEntry {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.img.clone(),
            stock: product.stock,
            category: product.category.clone(),
        }
    }
}

/// Deduplicated wishlist, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Wishlist {
    #[serde(default)]
    pub wishlist: Vec<WishlistEntry>,
}

impl Wishlist {
    /// Add a product unless it is already saved. Returns whether it was
    /// added.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.contains(product.id.as_str()) {
            return false;
        }
        self.wishlist.push(WishlistEntry::from(product));
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.wishlist.len();
        self.wishlist.retain(|e| e.product_id != id);
        self.wishlist.len() != before
    }

    pub fn clear(&mut self) {
        self.wishlist.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.wishlist.iter().any(|e| e.product_id == id)
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        &self.wishlist
    }

    pub fn len(&self) -> usize {
        self.wishlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wishlist.is_empty()
    }
}

/// Persisted wishlist store.
#[derive(Debug)]
pub struct WishlistStore {
    state: Persisted<Wishlist>,
}

impl WishlistStore {
    pub fn new(cache: Cache) -> Self {
        Self {
            state: Persisted::load(cache, StorageKey::Wishlist),
        }
    }

    pub fn wishlist(&self) -> &Wishlist {
        self.state.state()
    }

    pub fn add_to_wishlist(&mut self, product: &Product) -> bool {
        let added = self.state.update(|w| w.add(product));
        debug!(product_id = %product.id, added, "wishlist add");
        added
    }

    pub fn remove_from_wishlist(&mut self, id: &str) -> bool {
        self.state.update(|w| w.remove(id))
    }

    pub fn clear_wishlist(&mut self) {
        self.state.update(Wishlist::clear);
    }

    pub fn is_in_wishlist(&self, id: &str) -> bool {
        self.wishlist().contains(id)
    }

    /// Number of saved products. Entries carry no quantity.
    pub fn get_total_wishlist_quantity(&self) -> usize {
        self.wishlist().len()
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        self.wishlist().entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use brick_cache::MemoryStore;

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = Wishlist::default();
        let p = product("1", 100, 5);
        assert!(wishlist.add(&p));
        assert!(!wishlist.add(&p));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_entry_snapshot() {
        let mut p = product("9", 100, 20);
        p.category = "brickheadz".into();
        let entry = WishlistEntry::from(&p);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], "9");
        assert_eq!(value["category"], "brickheadz");
        assert_eq!(value["stock"], 20);
        assert_eq!(value["image"], "https://example.com/9.png");
    }

    #[test]
    fn test_store_operations() {
        let cache = Cache::new(MemoryStore::new());
        let mut store = WishlistStore::new(cache.clone());
        store.add_to_wishlist(&product("1", 100, 5));
        store.add_to_wishlist(&product("2", 100, 5));
        store.add_to_wishlist(&product("1", 100, 5));
        assert_eq!(store.get_total_wishlist_quantity(), 2);

        assert!(store.remove_from_wishlist("1"));
        assert!(!store.remove_from_wishlist("1"));
        assert!(!store.is_in_wishlist("1"));

        let reloaded = WishlistStore::new(cache);
        assert_eq!(reloaded.entries().len(), 1);
        assert!(reloaded.is_in_wishlist("2"));
    }

    #[test]
    fn test_clear() {
        let mut store = WishlistStore::new(Cache::new(MemoryStore::new()));
        store.add_to_wishlist(&product("1", 100, 5));
        store.clear_wishlist();
        assert_eq!(store.get_total_wishlist_quantity(), 0);
    }
}
