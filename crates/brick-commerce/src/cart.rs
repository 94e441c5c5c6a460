//! Shopping cart.
//!
//! Lines snapshot the product's name, price, image and stock when they are
//! first added. Later catalog changes do not touch existing lines.

use brick_cache::{Cache, Persisted, StorageKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    /// Unit price at add time.
    pub price: Money,
    pub image: String,
    /// Always within `1..=stock_ceiling`.
    pub quantity: u32,
    /// Product stock at add time.
    #[serde(rename = "stock")]
    pub stock_ceiling: u32,
}

impl CartLine {
    /// Line total (unit price times quantity).
    pub fn total(&self) -> Money {
        self.price.times(self.quantity)
    }

    pub fn is_at_ceiling(&self) -> bool {
        self.quantity >= self.stock_ceiling
    }
}

/// Cart contents, one line per product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    #[serde(default)]
    pub cart: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add units of a product, clamping to the stock ceiling.
    ///
    /// Returns the quantity now held for the product. Adding zero units,
    /// or a product with no stock that isn't already in the cart, changes
    /// nothing.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> u32 {
        if let Some(line) = self.line_mut(product.id.as_str()) {
            line.quantity = line
                .quantity
                .saturating_add(quantity)
                .min(line.stock_ceiling);
            return line.quantity;
        }

        let quantity = quantity.min(product.stock);
        if quantity == 0 {
            return 0;
        }

        self.cart.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.img.clone(),
            quantity,
            stock_ceiling: product.stock,
        });
        quantity
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.cart.len();
        self.cart.retain(|line| line.product_id != id);
        self.cart.len() != before
    }

    /// Add one unit unless the line is at its ceiling.
    pub fn increase_quantity(&mut self, id: &str) -> bool {
        match self.line_mut(id) {
            Some(line) if !line.is_at_ceiling() => {
                line.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Take one unit away, never going below 1.
    pub fn decrease_quantity(&mut self, id: &str) -> bool {
        match self.line_mut(id) {
            Some(line) if line.quantity > 1 => {
                line.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.cart.clear();
    }

    pub fn is_in_cart(&self, id: &str) -> bool {
        self.line(id).is_some()
    }

    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.cart.iter().find(|line| line.product_id == id)
    }

    fn line_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.cart.iter_mut().find(|line| line.product_id == id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.cart
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of quantities.
    pub fn total_quantity(&self) -> u32 {
        self.cart.iter().map(|line| line.quantity).sum()
    }

    /// Sum of line totals at snapshot prices.
    pub fn total_price(&self) -> Money {
        self.cart.iter().map(CartLine::total).sum()
    }
}

/// Persisted cart store.
#[derive(Debug)]
pub struct CartStore {
    state: Persisted<Cart>,
}

impl CartStore {
    /// Hydrate the cart from `cache`.
    pub fn new(cache: Cache) -> Self {
        Self {
            state: Persisted::load(cache, StorageKey::Cart),
        }
    }

    pub fn cart(&self) -> &Cart {
        self.state.state()
    }

    /// See [`Cart::add_item`].
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> u32 {
        let held = self.state.update(|cart| cart.add_item(product, quantity));
        debug!(product_id = %product.id, requested = quantity, held, "cart add");
        held
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let removed = self.state.update(|cart| cart.remove_item(id));
        debug!(product_id = id, removed, "cart remove");
        removed
    }

    pub fn increase_quantity(&mut self, id: &str) -> bool {
        self.state.update(|cart| cart.increase_quantity(id))
    }

    pub fn decrease_quantity(&mut self, id: &str) -> bool {
        self.state.update(|cart| cart.decrease_quantity(id))
    }

    pub fn clear_cart(&mut self) {
        self.state.update(Cart::clear);
        debug!("cart cleared");
    }

    pub fn is_in_cart(&self, id: &str) -> bool {
        self.cart().is_in_cart(id)
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart().lines()
    }

    pub fn get_total_quantity(&self) -> u32 {
        self.cart().total_quantity()
    }

    pub fn get_total_price(&self) -> Money {
        self.cart().total_price()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use brick_cache::MemoryStore;

    #[test]
    fn test_add_clamps_to_stock() {
        let mut cart = Cart::new();
        let p = product("1", 100, 10);
        assert_eq!(cart.add_item(&p, 15), 10);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 10);
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::new();
        let p = product("1", 100, 10);
        cart.add_item(&p, 4);
        assert_eq!(cart.add_item(&p, 3), 7);
        assert_eq!(cart.add_item(&p, 5), 10);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_add_zero_or_out_of_stock_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&product("1", 100, 10), 0), 0);
        assert_eq!(cart.add_item(&product("2", 100, 0), 3), 0);
        assert!(cart.is_empty());

        cart.add_item(&product("3", 100, 5), 2);
        assert_eq!(cart.add_item(&product("3", 100, 5), 0), 2);
    }

    #[test]
    fn test_snapshot_ceiling_survives_catalog_change() {
        let mut cart = Cart::new();
        let mut p = product("1", 100, 3);
        cart.add_item(&p, 1);

        p.stock = 50;
        p.price = Money::new(999);
        assert_eq!(cart.add_item(&p, 10), 3);
        assert_eq!(cart.lines()[0].price, Money::new(100));
    }

    #[test]
    fn test_increase_and_decrease_bounds() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100, 2), 1);

        assert!(!cart.decrease_quantity("1"));
        assert!(cart.increase_quantity("1"));
        assert!(!cart.increase_quantity("1"));
        assert_eq!(cart.line("1").unwrap().quantity, 2);

        assert!(cart.decrease_quantity("1"));
        assert!(!cart.decrease_quantity("1"));
        assert_eq!(cart.line("1").unwrap().quantity, 1);

        assert!(!cart.increase_quantity("missing"));
    }

    #[test]
    fn test_remove_is_only_way_to_zero() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100, 5), 1);
        assert!(!cart.remove_item("2"));
        assert!(cart.remove_item("1"));
        assert!(!cart.is_in_cart("1"));
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100, 10), 2);
        cart.add_item(&product("2", 50, 10), 3);
        assert_eq!(cart.total_price(), Money::new(350));
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_wire_format() {
        let mut cart = Cart::new();
        cart.add_item(&product("7", 2490, 40), 2);

        let value = serde_json::to_value(&cart).unwrap();
        let line = &value["cart"][0];
        assert_eq!(line["id"], "7");
        assert_eq!(line["price"], 2490);
        assert_eq!(line["quantity"], 2);
        assert_eq!(line["stock"], 40);
        assert_eq!(line["image"], "https://example.com/7.png");
    }

    #[test]
    fn test_store_persists_and_rehydrates() {
        let cache = Cache::new(MemoryStore::new());
        let mut store = CartStore::new(cache.clone());
        store.add_item(&product("1", 100, 10), 2);
        store.increase_quantity("1");

        let reloaded = CartStore::new(cache);
        assert_eq!(reloaded.get_total_quantity(), 3);
        assert!(reloaded.is_in_cart("1"));
    }

    #[test]
    fn test_store_keeps_state_when_storage_full() {
        let cache = Cache::new(MemoryStore::with_quota(8));
        let mut store = CartStore::new(cache);
        assert_eq!(store.add_item(&product("1", 100, 10), 2), 2);
        assert_eq!(store.get_total_price(), Money::new(200));

        store.clear_cart();
        assert!(store.lines().is_empty());
    }
}
