//! Checkout flow state machine.

use crate::checkout::{CheckoutError, PaymentInfo, ShippingInfo};
use crate::ids::OrderId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Shipping address and contact details.
    #[default]
    Shipping,
    /// Card details.
    Payment,
    /// Order review before submission.
    Review,
    /// Order placed.
    Confirmation,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Confirmation => "confirmation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Envío",
            CheckoutStep::Payment => "Pago",
            CheckoutStep::Review => "Revisar",
            CheckoutStep::Confirmation => "Confirmación",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
            CheckoutStep::Confirmation => 4,
        }
    }

    /// The step a user may go back to from here.
    pub fn previous(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Payment => Some(CheckoutStep::Shipping),
            CheckoutStep::Review => Some(CheckoutStep::Payment),
            CheckoutStep::Shipping | CheckoutStep::Confirmation => None,
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the one active checkout.
///
/// Forward moves only happen by submitting the step's form; `set_step`
/// only goes back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub current_step: CheckoutStep,
    pub shipping_info: Option<ShippingInfo>,
    pub payment_info: Option<PaymentInfo>,
    pub order_id: Option<OrderId>,
    pub is_processing: bool,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn invalid(&self, to: CheckoutStep) -> CheckoutError {
        CheckoutError::InvalidTransition {
            from: self.current_step,
            to,
        }
    }

    /// Move to `step`. Staying put is always fine; otherwise only
    /// payment → shipping and review → payment are allowed, and never
    /// while an order is pending.
    pub fn set_step(&mut self, step: CheckoutStep) -> Result<(), CheckoutError> {
        if step == self.current_step {
            return Ok(());
        }
        if self.is_processing || self.current_step.previous() != Some(step) {
            return Err(self.invalid(step));
        }
        self.current_step = step;
        Ok(())
    }

    /// Store shipping details and move on to payment.
    pub fn set_shipping_info(&mut self, info: ShippingInfo) -> Result<(), CheckoutError> {
        if self.current_step != CheckoutStep::Shipping {
            return Err(self.invalid(CheckoutStep::Payment));
        }
        self.shipping_info = Some(info);
        self.current_step = CheckoutStep::Payment;
        Ok(())
    }

    /// Store payment details and move on to review.
    pub fn set_payment_info(&mut self, info: PaymentInfo) -> Result<(), CheckoutError> {
        if self.current_step != CheckoutStep::Payment {
            return Err(self.invalid(CheckoutStep::Review));
        }
        self.payment_info = Some(info);
        self.current_step = CheckoutStep::Review;
        Ok(())
    }

    /// Mark an order as pending. Requires the review step with both forms
    /// submitted and no order already pending.
    pub fn begin_processing(&mut self) -> Result<(ShippingInfo, PaymentInfo), CheckoutError> {
        if self.is_processing {
            return Err(CheckoutError::AlreadyProcessing);
        }
        if self.current_step != CheckoutStep::Review {
            return Err(self.invalid(CheckoutStep::Confirmation));
        }
        let shipping = self
            .shipping_info
            .clone()
            .ok_or(CheckoutError::Incomplete("shipping info"))?;
        let payment = self
            .payment_info
            .clone()
            .ok_or(CheckoutError::Incomplete("payment info"))?;

        self.is_processing = true;
        Ok((shipping, payment))
    }

    /// Record a placed order.
    pub fn complete(&mut self, order_id: OrderId) {
        self.order_id = Some(order_id);
        self.is_processing = false;
        self.current_step = CheckoutStep::Confirmation;
    }

    /// Clear the pending flag after a failed order, staying at review.
    pub fn fail(&mut self) {
        self.is_processing = false;
    }

    /// Back to an empty session at shipping.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
