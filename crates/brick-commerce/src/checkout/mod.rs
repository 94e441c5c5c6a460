//! Checkout module.
//!
//! A four-step flow (shipping, payment, review, confirmation) kept in
//! memory only, plus the order placement that ends it.

mod error;
mod flow;
mod forms;
mod gateway;
mod order;
mod store;

pub use error::{CheckoutError, OrderFailure};
pub use flow::{CheckoutSession, CheckoutStep};
pub use forms::{FieldError, PaymentInfo, ShippingInfo, DEFAULT_COUNTRY};
pub use gateway::{PaymentGateway, SimulatedGateway, DEFAULT_SIMULATED_LATENCY};
pub use order::{OrderRequest, OrderSummary, ShippingPolicy};
pub use store::{CheckoutStore, DEFAULT_ORDER_TIMEOUT};
