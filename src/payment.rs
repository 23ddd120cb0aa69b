use crate::models::Order;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    pub url: String,
}

/// Opens a payment session for a persisted order.
pub trait PaymentProvider: Send + Sync {
    fn create_session(&self, order: &Order) -> anyhow::Result<PaymentSession>;
}

/// Stand-in provider: no money moves, the customer is pointed at a fixed
/// checkout host with the order id in the path.
#[derive(Debug, Clone)]
pub struct MockPaymentProvider {
    base_url: String,
}

impl MockPaymentProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl PaymentProvider for MockPaymentProvider {
    fn create_session(&self, order: &Order) -> anyhow::Result<PaymentSession> {
        tracing::debug!(order_id = %order.id, amount = %order.total_amount, "mock payment session");
        Ok(PaymentSession {
            url: format!(
                "{}/session_{}",
                self.base_url.trim_end_matches('/'),
                order.id.simple()
            ),
        })
    }
}
