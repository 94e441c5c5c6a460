//! End-to-end storefront behaviour against the reference catalog.

use std::sync::Arc;
use std::time::Duration;

use brick_cache::{Cache, MemoryStore, StorageKey};
use brick_commerce::prelude::*;

fn catalog() -> Catalog {
    Catalog::reference().expect("reference catalog parses")
}

fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

fn shipping() -> ShippingInfo {
    ShippingInfo {
        first_name: "Luis".to_string(),
        last_name: "García".to_string(),
        email: "luis@example.com".to_string(),
        phone: "55 1234 5678".to_string(),
        address: "Calle Madero 10".to_string(),
        city: "Guadalajara".to_string(),
        state: "Jalisco".to_string(),
        zip_code: "44100".to_string(),
        country: "México".to_string(),
    }
}

fn payment() -> PaymentInfo {
    PaymentInfo {
        card_number: "5555 5555 5555 4444".to_string(),
        card_name: "Luis García".to_string(),
        expiry_date: "08/28".to_string(),
        cvv: "321".to_string(),
    }
}

#[test]
fn star_wars_filter_keeps_catalog_order() {
    let catalog = catalog();
    let filters = ProductFilters::new().with(FacetKey::Theme, ["Star Wars"]);
    let matched = filter_by_criteria(catalog.products(), &filters);

    assert_eq!(
        ids(&matched),
        vec!["1", "2", "3", "4", "5", "6", "15", "18", "22"]
    );
    assert!(matched.iter().all(|p| p.theme == "Star Wars"));
}

#[test]
fn search_tokens_need_not_be_contiguous() {
    let catalog = catalog();

    let hits = search(catalog.products(), "clone wars");
    assert_eq!(ids(&hits), vec!["3"]);

    let hits = search(catalog.products(), "porsche");
    assert_eq!(ids(&hits), vec!["11"]);

    assert!(search(catalog.products(), "a").is_empty());
}

#[test]
fn listing_query_over_reference_catalog() {
    let catalog = catalog();

    let page = ProductQuery::new()
        .with_theme("technic")
        .with_sort(SortOption::PriceLowHigh)
        .execute(catalog.products());
    assert_eq!(ids(&page.products), vec!["17", "19", "11", "13"]);

    let first = ProductQuery::new().execute(catalog.products());
    assert_eq!(first.len(), 9);
    assert_eq!(first.pagination.total_pages, 3);

    let beyond = ProductQuery::new()
        .with_pagination(4, 9)
        .execute(catalog.products());
    assert!(beyond.is_empty());
    assert_eq!(beyond.total(), 22);
}

#[test]
fn related_products_share_theme_or_category() {
    let catalog = catalog();
    let related = related_to(catalog.products(), "15", 4);
    assert_eq!(ids(&related), vec!["1", "2", "3", "4"]);
    assert!(related_to(catalog.products(), "999", 4).is_empty());
}

#[test]
fn cart_totals_scenario() {
    let mut a = catalog().get("8").cloned().expect("product 8");
    a.price = Money::new(100);
    let mut b = catalog().get("9").cloned().expect("product 9");
    b.price = Money::new(50);

    let mut cart = CartStore::new(Cache::new(MemoryStore::new()));
    cart.add_item(&a, 2);
    cart.add_item(&b, 3);

    assert_eq!(cart.get_total_price(), Money::new(350));
    assert_eq!(cart.get_total_quantity(), 5);
}

#[test]
fn cart_clamps_and_merges_against_reference_stock() {
    let catalog = catalog();
    let helmet = catalog.get("1").expect("product 1");
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()));

    assert_eq!(cart.add_item(helmet, 15), helmet.stock);
    cart.remove_item("1");
    cart.add_item(helmet, 6);
    assert_eq!(cart.add_item(helmet, 6), 10);
    assert_eq!(cart.lines().len(), 1);

    for _ in 0..20 {
        cart.decrease_quantity("1");
    }
    assert_eq!(cart.lines()[0].quantity, 1);
}

#[test]
fn stores_share_one_backend() {
    let cache = Cache::new(MemoryStore::new());
    let catalog = catalog();

    let mut wishlist = WishlistStore::new(cache.clone());
    let mut compare = CompareStore::new(cache.clone());
    let mut recent = RecentlyViewedStore::new(cache.clone());
    let mut theme = ThemeStore::new(cache.clone());

    wishlist.add_to_wishlist(catalog.get("12").expect("product 12"));
    for id in ["11", "13", "17", "19"] {
        assert!(compare.add_to_compare(catalog.get(id).expect("technic product")));
    }
    assert!(!compare.add_to_compare(catalog.get("1").expect("product 1")));
    recent.add_item(catalog.get("20").expect("product 20"));
    theme.set_theme(Theme::Dark);

    let mut keys = cache.keys().expect("keys");
    keys.sort();
    let mut expected: Vec<String> = [
        StorageKey::Wishlist,
        StorageKey::Compare,
        StorageKey::RecentlyViewed,
        StorageKey::Theme,
    ]
    .iter()
    .map(|k| k.as_str().to_string())
    .collect();
    expected.sort();
    assert_eq!(keys, expected);

    assert!(WishlistStore::new(cache.clone()).is_in_wishlist("12"));
    assert!(!CompareStore::new(cache.clone()).can_add_more());
    assert_eq!(RecentlyViewedStore::new(cache.clone()).get_items()[0].id, "20");
    assert_eq!(ThemeStore::new(cache).theme(), Theme::Dark);
}

#[test]
fn full_storage_keeps_session_state() {
    let cache = Cache::new(MemoryStore::with_quota(16));
    let catalog = catalog();
    let mut compare = CompareStore::new(cache.clone());

    assert!(compare.add_to_compare(catalog.get("4").expect("product 4")));
    assert!(compare.is_in_compare("4"));
    assert!(!cache
        .exists(StorageKey::Compare.as_str())
        .expect("exists"));
}

#[test]
fn reviews_average_and_order() {
    let mut reviews = ReviewStore::new(Cache::new(MemoryStore::new()));
    assert_eq!(reviews.get_average_rating("4"), 0.0);

    for rating in [5, 4] {
        reviews.add_review(NewReview {
            product_id: ProductId::new("4"),
            user_id: UserId::new("u-7"),
            user_name: "Marta".to_string(),
            rating,
            title: "Muy bueno".to_string(),
            comment: "Se ve increíble en la repisa".to_string(),
            verified: false,
        });
    }

    assert_eq!(reviews.get_average_rating("4"), 4.5);
    let listed = reviews.get_product_reviews("4");
    assert_eq!(listed[0].rating, 4);
    assert_eq!(listed[1].rating, 5);
}

#[tokio::test(start_paused = true)]
async fn checkout_end_to_end() {
    let catalog = catalog();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()));
    cart.add_item(catalog.get("12").expect("product 12"), 1);
    cart.add_item(catalog.get("5").expect("product 5"), 2);

    let summary = OrderSummary::from_cart(cart.cart(), &ShippingPolicy::default());
    assert_eq!(summary.subtotal, Money::new(8999 + 2 * 189));
    assert!(summary.has_free_shipping());

    let checkout = CheckoutStore::new(Arc::new(SimulatedGateway::default()));
    assert!(checkout.set_step(CheckoutStep::Payment).is_err());

    shipping().validate().expect("valid shipping form");
    checkout.set_shipping_info(shipping()).expect("shipping step");
    payment().validate().expect("valid payment form");
    checkout.set_payment_info(payment()).expect("payment step");
    checkout.set_step(CheckoutStep::Payment).expect("back to payment");
    checkout.set_payment_info(payment()).expect("payment again");

    let order_id = checkout.process_order(summary).await.expect("order placed");
    assert!(order_id.as_str().starts_with("LEGO-"));
    cart.clear_cart();

    assert_eq!(checkout.current_step(), CheckoutStep::Confirmation);
    assert!(checkout.set_step(CheckoutStep::Review).is_err());
    assert!(cart.lines().is_empty());

    checkout.reset_checkout();
    assert_eq!(checkout.current_step(), CheckoutStep::Shipping);
    assert!(checkout.session().order_id.is_none());
}

#[tokio::test(start_paused = true)]
async fn checkout_failure_allows_retry() {
    let summary = OrderSummary {
        item_count: 1,
        subtotal: Money::new(649),
        shipping: Money::new(299),
        total: Money::new(948),
    };

    let failing = CheckoutStore::new(Arc::new(
        SimulatedGateway::default().with_failure(OrderFailure::Network("connection reset".into())),
    ));
    failing.set_shipping_info(shipping()).expect("shipping step");
    failing.set_payment_info(payment()).expect("payment step");

    let err = failing.process_order(summary).await.unwrap_err();
    assert_eq!(err.reason(), Some("network"));
    assert_eq!(failing.current_step(), CheckoutStep::Review);
    assert!(!failing.is_processing());

    let slow = CheckoutStore::new(Arc::new(SimulatedGateway::new(Duration::from_secs(45))));
    slow.set_shipping_info(shipping()).expect("shipping step");
    slow.set_payment_info(payment()).expect("payment step");
    let err = slow.process_order(summary).await.unwrap_err();
    assert_eq!(err.reason(), Some("timeout"));
}
