//! Storage key namespace.

use std::fmt;

/// The key each persisted store writes its document under.
///
/// Checkout state has no key: it lives for one session only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// `{ "cart": [CartLine] }`
    Cart,
    /// `{ "wishlist": [WishlistEntry] }`
    Wishlist,
    /// `{ "items": [Product] }`
    Compare,
    /// `{ "items": [Product] }`
    RecentlyViewed,
    /// `{ "reviews": [Review] }`
    Reviews,
    /// `{ "state": { "theme": ... } }`
    Theme,
}

impl StorageKey {
    /// All keys, in the order stores are usually constructed.
    pub const ALL: [StorageKey; 6] = [
        StorageKey::Cart,
        StorageKey::Wishlist,
        StorageKey::Compare,
        StorageKey::RecentlyViewed,
        StorageKey::Reviews,
        StorageKey::Theme,
    ];

    /// The raw key string.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Cart => "lego-cart-storage",
            StorageKey::Wishlist => "lego-wishlist-storage",
            StorageKey::Compare => "lego-compare-storage",
            StorageKey::RecentlyViewed => "lego-recently-viewed",
            StorageKey::Reviews => "lego-reviews-storage",
            StorageKey::Theme => "lego-theme-storage",
        }
    }

    /// Look a key up by its raw string.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
