//! Checkout store.

use crate::checkout::{
    CheckoutError, CheckoutSession, CheckoutStep, OrderFailure, OrderRequest, OrderSummary,
    PaymentGateway, PaymentInfo, ShippingInfo,
};
use crate::ids::OrderId;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default limit on how long placing an order may take.
pub const DEFAULT_ORDER_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Default)]
struct Inner {
    session: CheckoutSession,
    /// Bumped on every reset so a pending order can tell its session is
    /// gone.
    generation: u64,
}

/// Holds the active checkout session and places orders.
///
/// The session lives in memory only. All methods take `&self`, so a
/// second `process_order` issued while one is pending sees the pending
/// flag and is rejected.
pub struct CheckoutStore {
    inner: Mutex<Inner>,
    gateway: Arc<dyn PaymentGateway>,
    order_timeout: Duration,
}

impl CheckoutStore {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            gateway,
            order_timeout: DEFAULT_ORDER_TIMEOUT,
        }
    }

    pub fn with_order_timeout(mut self, timeout: Duration) -> Self {
        self.order_timeout = timeout;
        self
    }

    pub fn order_timeout(&self) -> Duration {
        self.order_timeout
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> CheckoutSession {
        self.lock().session.clone()
    }

    pub fn current_step(&self) -> CheckoutStep {
        self.lock().session.current_step
    }

    pub fn is_processing(&self) -> bool {
        self.lock().session.is_processing
    }

    pub fn set_step(&self, step: CheckoutStep) -> Result<(), CheckoutError> {
        self.lock().session.set_step(step)
    }

    pub fn set_shipping_info(&self, info: ShippingInfo) -> Result<(), CheckoutError> {
        self.lock().session.set_shipping_info(info)?;
        debug!("shipping info set");
        Ok(())
    }

    pub fn set_payment_info(&self, info: PaymentInfo) -> Result<(), CheckoutError> {
        self.lock().session.set_payment_info(info)?;
        debug!("payment info set");
        Ok(())
    }

    /// Place the order for `summary`.
    ///
    /// On success the session moves to confirmation with a fresh order id.
    /// On failure it stays at review with the pending flag cleared. If the
    /// session is reset while the gateway is working, the outcome is
    /// dropped and [`CheckoutError::Abandoned`] is returned.
    pub async fn process_order(&self, summary: OrderSummary) -> Result<OrderId, CheckoutError> {
        if summary.item_count == 0 {
            return Err(CheckoutError::Incomplete("cart items"));
        }

        let (generation, request) = {
            let mut inner = self.lock();
            let (shipping, payment) = inner.session.begin_processing()?;
            (
                inner.generation,
                OrderRequest {
                    shipping,
                    payment,
                    summary,
                },
            )
        };
        let mut pending = PendingOrder {
            store: self,
            generation,
            settled: false,
        };

        info!(total = %summary.total, items = summary.item_count, "placing order");
        let outcome =
            match tokio::time::timeout(self.order_timeout, self.gateway.charge(&request)).await {
                Ok(result) => result,
                Err(_) => Err(OrderFailure::Timeout(self.order_timeout)),
            };
        pending.settled = true;

        let mut inner = self.lock();
        if inner.generation != generation {
            warn!("checkout reset while order was pending; discarding outcome");
            return Err(CheckoutError::Abandoned);
        }

        match outcome {
            Ok(()) => {
                let order_id = OrderId::generate();
                inner.session.complete(order_id.clone());
                info!(order_id = %order_id, "order placed");
                Ok(order_id)
            }
            Err(failure) => {
                inner.session.fail();
                warn!(reason = failure.reason(), error = %failure, "order failed");
                Err(failure.into())
            }
        }
    }

    /// Clear the session and return to shipping. Any pending order is
    /// abandoned.
    pub fn reset_checkout(&self) {
        let mut inner = self.lock();
        inner.session.reset();
        inner.generation = inner.generation.wrapping_add(1);
        debug!(generation = inner.generation, "checkout reset");
    }
}

impl std::fmt::Debug for CheckoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutStore")
            .field("session", &self.session())
            .field("order_timeout", &self.order_timeout)
            .finish_non_exhaustive()
    }
}

/// Clears the pending flag if `process_order` is dropped before the
/// gateway answers.
struct PendingOrder<'a> {
    store: &'a CheckoutStore,
    generation: u64,
    settled: bool,
}

impl Drop for PendingOrder<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.store.lock();
        if inner.generation == self.generation {
            inner.session.fail();
            debug!("order future dropped; pending flag cleared");
        }
    }
}
