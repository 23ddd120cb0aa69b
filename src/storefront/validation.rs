use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::OrderType;

use super::cart::CartLine;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerDetails {
    pub fn phone(&self) -> Option<&str> {
        non_blank(self.phone.as_deref())
    }

    pub fn address(&self) -> Option<&str> {
        non_blank(self.address.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Missing required customer details")]
    MissingCustomerInfo,
}

impl ValidationError {
    /// Title and description for the failure notice.
    pub fn describe(&self) -> (&'static str, &'static str) {
        match self {
            ValidationError::EmptyCart => (
                "Cart is empty",
                "Please add items to your cart before checking out.",
            ),
            ValidationError::MissingCustomerInfo => (
                "Missing Information",
                "Please fill in all required customer details.",
            ),
        }
    }
}

/// Checks a checkout before anything is sent.
///
/// Name and email are always required; the address only for delivery.
/// Whitespace-only values count as blank.
pub fn validate(
    lines: &[CartLine],
    customer: &CustomerDetails,
    order_type: OrderType,
) -> Result<(), ValidationError> {
    if lines.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    if is_blank(&customer.name) || is_blank(&customer.email) {
        return Err(ValidationError::MissingCustomerInfo);
    }
    if order_type == OrderType::Delivery && customer.address().is_none() {
        return Err(ValidationError::MissingCustomerInfo);
    }
    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
