//! Checkout errors.

use crate::checkout::CheckoutStep;
use std::time::Duration;
use thiserror::Error;

/// Why an order could not be placed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderFailure {
    /// The gateway could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The gateway refused the payment.
    #[error("Payment declined: {0}")]
    Declined(String),

    /// No answer within the order timeout.
    #[error("Order timed out after {0:?}")]
    Timeout(Duration),
}

impl OrderFailure {
    /// Short machine-readable reason: `network`, `declined` or `timeout`.
    pub fn reason(&self) -> &'static str {
        match self {
            OrderFailure::Network(_) => "network",
            OrderFailure::Declined(_) => "declined",
            OrderFailure::Timeout(_) => "timeout",
        }
    }

    /// Whether trying again may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, OrderFailure::Declined(_))
    }
}

/// Errors from the checkout flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Step change the flow does not allow.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidTransition { from: CheckoutStep, to: CheckoutStep },

    /// Something the order needs is missing.
    #[error("Checkout incomplete: missing {0}")]
    Incomplete(&'static str),

    /// An order is already pending for this session.
    #[error("An order is already being processed")]
    AlreadyProcessing,

    /// Placing the order failed; the session stays at review.
    #[error(transparent)]
    Order(#[from] OrderFailure),

    /// The session was reset while the order was pending.
    #[error("Checkout was reset before the order completed")]
    Abandoned,
}

impl CheckoutError {
    /// The order failure reason, if this is an order failure.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            CheckoutError::Order(failure) => Some(failure.reason()),
            _ => None,
        }
    }
}
