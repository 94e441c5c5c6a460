//! Storefront domain types and client-side stores for Brickshop.
//!
//! - **Catalog**: the immutable product list and its facets
//! - **Search**: filtering, sorting, pagination, text search, related products
//! - **Stores**: cart, wishlist, compare, recently viewed, reviews, theme,
//!   each persisted through [`brick_cache`]
//! - **Checkout**: the in-memory four-step flow and order placement
//!
//! Stores are plain values built over a [`brick_cache::Cache`]. Domain
//! rules never raise errors: quantities are clamped and refusals come back
//! as booleans. Only placing an order can fail.
//!
//! # Example
//!
//! ```rust
//! use brick_cache::{Cache, MemoryStore};
//! use brick_commerce::prelude::*;
//!
//! let catalog = Catalog::reference().unwrap();
//! let mut cart = CartStore::new(Cache::new(MemoryStore::new()));
//!
//! let falcon = catalog.get("15").unwrap();
//! // Only 3 in stock; the quantity is clamped.
//! assert_eq!(cart.add_item(falcon, 5), 3);
//! assert_eq!(cart.get_total_price(), Money::new(3 * 12999));
//!
//! let star_wars = ProductQuery::new()
//!     .with_theme("Star Wars")
//!     .with_sort(SortOption::PriceHighLow)
//!     .execute(catalog.products());
//! assert_eq!(star_wars.total(), 9);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod compare;
pub mod recently_viewed;
pub mod reviews;
pub mod search;
pub mod theme;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, FacetKey, Product};

    // Search
    pub use crate::search::{
        filter_by_criteria, paginate, related_to, search, sort_by, Page, Pagination,
        ProductFilters, ProductQuery, SortOption,
    };

    // Stores
    pub use crate::cart::{Cart, CartLine, CartStore};
    pub use crate::compare::{CompareSet, CompareStore, MAX_COMPARE_ITEMS};
    pub use crate::recently_viewed::{RecentlyViewed, RecentlyViewedStore, MAX_RECENTLY_VIEWED};
    pub use crate::reviews::{NewReview, Review, ReviewBook, ReviewStore, ReviewSummary};
    pub use crate::theme::{Appearance, Theme, ThemeStore};
    pub use crate::wishlist::{Wishlist, WishlistEntry, WishlistStore};

    // Checkout
    pub use crate::checkout::{
        CheckoutError, CheckoutSession, CheckoutStep, CheckoutStore, OrderFailure, OrderSummary,
        PaymentGateway, PaymentInfo, ShippingInfo, ShippingPolicy, SimulatedGateway,
    };
}
