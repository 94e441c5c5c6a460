//! Payment gateways.

use crate::checkout::{OrderFailure, OrderRequest};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Default latency of [`SimulatedGateway`].
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_secs(2);

/// Charges an order.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Authorize and capture the order's total.
    async fn charge(&self, request: &OrderRequest) -> Result<(), OrderFailure>;
}

/// Gateway that waits a fixed latency and then accepts, or fails with a
/// scripted failure.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
    failure: Option<OrderFailure>,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_LATENCY)
    }
}

impl SimulatedGateway {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failure: None,
        }
    }

    /// Fail every charge with `failure`.
    pub fn with_failure(mut self, failure: OrderFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &OrderRequest) -> Result<(), OrderFailure> {
        debug!(
            total = %request.summary.total,
            card = %request.payment.masked_number(),
            latency_ms = self.latency.as_millis() as u64,
            "simulated charge"
        );
        tokio::time::sleep(self.latency).await;
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::forms::fixtures::{payment, shipping};
    use crate::checkout::OrderSummary;
    use crate::money::Money;

    fn request() -> OrderRequest {
        OrderRequest {
            shipping: shipping(),
            payment: payment(),
            summary: OrderSummary {
                item_count: 1,
                subtotal: Money::new(899),
                shipping: Money::new(299),
                total: Money::new(1198),
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_waits_then_accepts() {
        let gateway = SimulatedGateway::default();
        let start = tokio::time::Instant::now();
        gateway.charge(&request()).await.unwrap();
        assert!(start.elapsed() >= DEFAULT_SIMULATED_LATENCY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_scripted_failure() {
        let gateway = SimulatedGateway::new(Duration::from_millis(10))
            .with_failure(OrderFailure::Declined("card reported stolen".into()));
        let err = gateway.charge(&request()).await.unwrap_err();
        assert_eq!(err.reason(), "declined");
    }
}
