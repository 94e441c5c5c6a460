//! Order totals.

use crate::cart::Cart;
use crate::checkout::{PaymentInfo, ShippingInfo};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Flat-rate shipping with a free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Subtotals at or above this ship free.
    pub free_shipping_threshold: Money,
    /// Fee below the threshold.
    pub shipping_fee: Money,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::new(5000),
            shipping_fee: Money::new(299),
        }
    }
}

impl ShippingPolicy {
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_shipping_threshold {
            Money::ZERO
        } else {
            self.shipping_fee
        }
    }

    /// How much more would unlock free shipping; zero once it applies.
    pub fn remaining_for_free_shipping(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_shipping_threshold {
            Money::ZERO
        } else {
            self.free_shipping_threshold - subtotal
        }
    }
}

/// Totals shown on the review step and charged on submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub item_count: u32,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl OrderSummary {
    pub fn from_cart(cart: &Cart, policy: &ShippingPolicy) -> Self {
        let subtotal = cart.total_price();
        let shipping = policy.shipping_for(subtotal);
        Self {
            item_count: cart.total_quantity(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Everything a payment gateway is asked to charge.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub shipping: ShippingInfo,
    pub payment: PaymentInfo,
    pub summary: OrderSummary,
}
