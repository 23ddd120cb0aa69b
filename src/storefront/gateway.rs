use async_trait::async_trait;
use thiserror::Error;

use crate::{
    dto::checkout::{CheckoutConfirmation, CheckoutRequest},
    error::AppError,
    services::order_service,
    state::AppState,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The endpoint answered with an error payload.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("checkout request failed: {0}")]
    Transport(String),
}

/// Carries a checkout request to the order submission endpoint.
///
/// Only [`InProcessGateway`] ships with the crate. A front end talking to a
/// remote server plugs in an HTTP implementation and reports connection
/// failures as [`GatewayError::Transport`].
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn submit(&self, request: CheckoutRequest)
    -> Result<CheckoutConfirmation, GatewayError>;
}

/// Gateway that runs the checkout service in the same process.
#[derive(Clone)]
pub struct InProcessGateway {
    state: AppState,
}

impl InProcessGateway {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl CheckoutGateway for InProcessGateway {
    async fn submit(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutConfirmation, GatewayError> {
        match order_service::checkout(&self.state, request).await {
            Ok(resp) => resp
                .data
                .ok_or_else(|| GatewayError::Transport("empty checkout response".into())),
            Err(err) => {
                let status = err.status_code().as_u16();
                // The customer sees the reason, not the status prefix.
                let message = match err {
                    AppError::BadRequest(reason) => reason,
                    other => other.to_string(),
                };
                Err(GatewayError::Rejected { status, message })
            }
        }
    }
}
