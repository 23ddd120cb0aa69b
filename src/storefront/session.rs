use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    dto::checkout::{CheckoutConfirmation, CheckoutRequest},
    models::{MenuItem, OrderType},
};

use super::{
    cart::Cart,
    gateway::{CheckoutGateway, GatewayError},
    notice::Notice,
    validation::{CustomerDetails, ValidationError, validate},
};

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("checkout timed out after {0:?}")]
    TimedOut(Duration),
}

impl From<GatewayError> for CheckoutError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected { status, message } => CheckoutError::Rejected { status, message },
            GatewayError::Transport(message) => CheckoutError::Transport(message),
        }
    }
}

/// One customer's browsing session: the cart, the checkout form and the
/// notices raised along the way.
///
/// Everything is mutated through `&mut self`; the only await point is the
/// order submission in [`CheckoutSession::submit`].
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    cart: Cart,
    customer: CustomerDetails,
    order_type: OrderType,
    cart_open: bool,
    notices: Vec<Notice>,
    submit_timeout: Option<Duration>,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self {
            cart: Cart::new(),
            customer: CustomerDetails::default(),
            order_type: OrderType::Pickup,
            cart_open: false,
            notices: Vec::new(),
            submit_timeout: Some(DEFAULT_SUBMIT_TIMEOUT),
        }
    }
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` waits for the endpoint indefinitely.
    pub fn with_submit_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(notice) = self.cart.add_item(item) {
            self.notices.push(notice);
        }
    }

    pub fn remove_item(&mut self, item_id: Uuid) {
        self.cart.remove_item(item_id);
    }

    pub fn set_quantity(&mut self, item_id: Uuid, quantity: i64) {
        self.cart.set_quantity(item_id, quantity);
    }

    pub fn increment(&mut self, item_id: Uuid) {
        self.cart.increment(item_id);
    }

    pub fn decrement(&mut self, item_id: Uuid) {
        self.cart.decrement(item_id);
    }

    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn customer_mut(&mut self) -> &mut CustomerDetails {
        &mut self.customer
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn set_order_type(&mut self, order_type: OrderType) {
        self.order_type = order_type;
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self.cart.lines(), &self.customer, self.order_type)
    }

    /// Validates and submits the cart as an order.
    ///
    /// On success the cart and form are reset and the cart view is closed.
    /// On any failure the session is left as it was so the customer can fix
    /// the problem and retry.
    pub async fn submit(
        &mut self,
        gateway: &dyn CheckoutGateway,
    ) -> Result<CheckoutConfirmation, CheckoutError> {
        if let Err(err) = self.validate() {
            let (title, description) = err.describe();
            self.notices.push(Notice::failure(title, description));
            return Err(err.into());
        }

        let request = CheckoutRequest {
            cart: self.cart.lines().to_vec(),
            customer_details: self.customer.clone(),
            order_type: self.order_type,
            total_amount: self.cart.subtotal(),
        };

        let outcome = match self.submit_timeout {
            Some(limit) => match tokio::time::timeout(limit, gateway.submit(request)).await {
                Ok(result) => result.map_err(CheckoutError::from),
                Err(_) => Err(CheckoutError::TimedOut(limit)),
            },
            None => gateway.submit(request).await.map_err(CheckoutError::from),
        };

        match outcome {
            Ok(confirmation) => {
                tracing::info!(order_id = %confirmation.order_id, "order placed");
                self.cart.clear();
                self.customer = CustomerDetails::default();
                self.cart_open = false;
                self.notices.push(Notice::success(
                    "Order Placed!",
                    format!(
                        "Your order {} has been successfully placed. You will receive an email confirmation shortly.",
                        confirmation.order_id
                    ),
                ));
                Ok(confirmation)
            }
            Err(err) => {
                tracing::warn!(error = %err, "checkout failed");
                let description = match &err {
                    CheckoutError::TimedOut(_) | CheckoutError::Transport(_) => {
                        "There was an error processing your order. Please try again.".to_string()
                    }
                    other => other.to_string(),
                };
                self.notices.push(Notice::failure("Order Failed", description));
                Err(err)
            }
        }
    }
}
